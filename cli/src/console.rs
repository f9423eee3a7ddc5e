//! Line-oriented menu session: an authentication gate, then the inventory menu.
//!
//! Input and output are generic so a session can be scripted end to end.
//! Domain failures are printed and the menu continues; only terminal I/O
//! errors end the session early. End of input is treated as "exit".

use std::io::{BufRead, Write};

use anyhow::Result;
use crossterm::style::{Color, Stylize};
use zoo_core::{AnimalEdit, Registration, Zoo, ZooError};
use zoo_types::{AnimalId, AnimalKind};

use crate::render;

enum Flow {
    Continue,
    Exit,
}

/// Reply to a prompt that may be left blank.
enum Reply<T> {
    Given(T),
    Blank,
    Closed,
}

pub struct Console<R, W> {
    zoo: Zoo,
    input: R,
    output: W,
    color: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(zoo: Zoo, input: R, output: W, color: bool) -> Self {
        Self {
            zoo,
            input,
            output,
            color,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn run(&mut self) -> Result<()> {
        self.heading("Zoo inventory")?;
        let Some(identifier) = self.authenticate()? else {
            self.say("Goodbye.")?;
            return Ok(());
        };
        tracing::info!(user = %identifier, "Session started");
        self.say(&format!("Welcome, {identifier}."))?;

        while let Flow::Continue = self.main_menu()? {}

        tracing::info!(user = %identifier, "Session ended");
        self.say("Goodbye.")?;
        Ok(())
    }

    /// Loop over the login/register menu. `Some(identifier)` once logged in.
    fn authenticate(&mut self) -> Result<Option<String>> {
        loop {
            self.heading("1) Log in   2) Register   0) Exit")?;
            let Some(choice) = self.prompt("Choice")? else {
                return Ok(None);
            };
            match choice.trim() {
                "1" => {
                    let Some((identifier, secret)) = self.credentials()? else {
                        return Ok(None);
                    };
                    match self.zoo.login(&identifier, &secret) {
                        Ok(true) => return Ok(Some(identifier)),
                        Ok(false) => {
                            tracing::info!("Login rejected");
                            self.fail("Invalid email or password.")?;
                        }
                        Err(e) => self.report(&e)?,
                    }
                }
                "2" => {
                    let Some((identifier, secret)) = self.credentials()? else {
                        return Ok(None);
                    };
                    match self.zoo.register(&identifier, &secret) {
                        Ok(Registration::Registered(user)) => {
                            tracing::info!(id = %user.id(), "Registered account");
                            self.ok("Account created. You can log in now.")?;
                        }
                        Ok(Registration::Duplicate) => {
                            self.fail("That email is already registered.")?;
                        }
                        Err(e) => self.report(&e)?,
                    }
                }
                "0" => return Ok(None),
                other => self.fail(&format!("Unknown option: {other}"))?,
            }
        }
    }

    fn credentials(&mut self) -> Result<Option<(String, String)>> {
        let Some(identifier) = self.prompt("Email")? else {
            return Ok(None);
        };
        let Some(secret) = self.prompt("Password")? else {
            return Ok(None);
        };
        Ok(Some((identifier.trim().to_string(), secret)))
    }

    fn main_menu(&mut self) -> Result<Flow> {
        self.heading(
            "1) List animals   2) Add   3) Edit   4) Sounds   5) Delete   6) Statistics   0) Exit",
        )?;
        let Some(choice) = self.prompt("Choice")? else {
            return Ok(Flow::Exit);
        };
        match choice.trim() {
            "1" => self.list(),
            "2" => self.add(),
            "3" => self.edit(),
            "4" => self.sounds(),
            "5" => self.delete(),
            "6" => self.statistics(),
            "0" => Ok(Flow::Exit),
            other => {
                self.fail(&format!("Unknown option: {other}"))?;
                Ok(Flow::Continue)
            }
        }
    }

    fn list(&mut self) -> Result<Flow> {
        match self.zoo.list_animals() {
            Ok(animals) => self.print(&render::animal_table(&animals))?,
            Err(e) => self.report(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn sounds(&mut self) -> Result<Flow> {
        match self.zoo.sounds() {
            Ok(sounds) => self.print(&render::sounds(&sounds))?,
            Err(e) => self.report(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn statistics(&mut self) -> Result<Flow> {
        match self.zoo.statistics() {
            Ok(stats) => self.print(&render::statistics(&stats))?,
            Err(e) => self.report(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn add(&mut self) -> Result<Flow> {
        let Some(kind) = self.prompt_kind()? else {
            return Ok(Flow::Exit);
        };
        let Some(name) = self.prompt("Name")? else {
            return Ok(Flow::Exit);
        };
        let weight = match self.prompt_number("Weight (kg)", false)? {
            Reply::Given(weight) => weight,
            Reply::Blank | Reply::Closed => return Ok(Flow::Exit),
        };
        let extra = match kind.extra_label() {
            Some(label) => {
                let Some(extra) = self.prompt(&capitalize(label))? else {
                    return Ok(Flow::Exit);
                };
                extra
            }
            None => String::new(),
        };

        match self.zoo.add_animal(kind, &name, weight, &extra) {
            Ok(animal) => self.ok(&format!("Added {}", animal.description()))?,
            Err(e) => self.report(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn edit(&mut self) -> Result<Flow> {
        let Some(id) = self.prompt_id()? else {
            return Ok(Flow::Exit);
        };
        let animal = match self.zoo.find_animal(id) {
            Ok(Some(animal)) => animal,
            Ok(None) => {
                self.fail(&format!("No animal with id {id}."))?;
                return Ok(Flow::Continue);
            }
            Err(e) => {
                self.report(&e)?;
                return Ok(Flow::Continue);
            }
        };
        self.say(&animal.description())?;
        self.say("Leave a field blank to keep its current value.")?;

        let Some(name) = self.prompt(&format!("Name [{}]", animal.name()))? else {
            return Ok(Flow::Exit);
        };
        let weight = match self.prompt_number(&format!("Weight (kg) [{}]", animal.weight()), true)? {
            Reply::Given(weight) => Some(weight),
            Reply::Blank => None,
            Reply::Closed => return Ok(Flow::Exit),
        };
        let extra = match animal.kind().extra_label() {
            Some(label) => {
                let current = animal.species().extra_cell();
                let Some(extra) = self.prompt(&format!("{} [{current}]", capitalize(label)))?
                else {
                    return Ok(Flow::Exit);
                };
                extra
            }
            None => String::new(),
        };

        let edit = AnimalEdit {
            name: non_blank(&name),
            weight,
            extra: non_blank(&extra),
        };
        match self.zoo.edit_animal(id, edit) {
            Ok(animal) => self.ok(&format!("Updated {}", animal.description()))?,
            Err(e) => self.report(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn delete(&mut self) -> Result<Flow> {
        let Some(id) = self.prompt_id()? else {
            return Ok(Flow::Exit);
        };
        match self.zoo.delete_animal(id) {
            Ok(Some(animal)) => self.ok(&format!("Deleted {}", animal.description()))?,
            Ok(None) => self.fail(&format!("No animal with id {id}."))?,
            Err(e) => self.report(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn prompt_kind(&mut self) -> Result<Option<AnimalKind>> {
        let menu: Vec<String> = AnimalKind::ALL
            .iter()
            .enumerate()
            .map(|(idx, kind)| format!("{}) {kind}", idx + 1))
            .collect();
        self.say(&menu.join("   "))?;

        loop {
            let Some(raw) = self.prompt("Type")? else {
                return Ok(None);
            };
            let raw = raw.trim();
            let by_number = raw
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|idx| AnimalKind::ALL.get(idx).copied());
            if let Some(kind) = by_number.or_else(|| AnimalKind::parse(raw)) {
                return Ok(Some(kind));
            }
            self.fail(&format!("Unknown animal type: {raw}"))?;
        }
    }

    fn prompt_id(&mut self) -> Result<Option<AnimalId>> {
        loop {
            let Some(raw) = self.prompt("Animal id")? else {
                return Ok(None);
            };
            match raw.trim().parse::<u64>() {
                Ok(id) => return Ok(Some(AnimalId::new(id))),
                Err(_) => self.fail("Enter a whole number.")?,
            }
        }
    }

    /// Re-prompts until the reply parses as a number, or is blank when
    /// `allow_blank` is set.
    fn prompt_number(&mut self, label: &str, allow_blank: bool) -> Result<Reply<f64>> {
        loop {
            let Some(raw) = self.prompt(label)? else {
                return Ok(Reply::Closed);
            };
            let raw = raw.trim();
            if raw.is_empty() && allow_blank {
                return Ok(Reply::Blank);
            }
            match raw.parse::<f64>() {
                Ok(value) => return Ok(Reply::Given(value)),
                Err(_) => self.fail("Enter a number.")?,
            }
        }
    }

    /// One line of input without its terminator. `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn heading(&mut self, text: &str) -> Result<()> {
        let text = self.paint(text, Color::Cyan);
        writeln!(self.output, "\n{text}")?;
        Ok(())
    }

    fn ok(&mut self, text: &str) -> Result<()> {
        let text = self.paint(text, Color::Green);
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    fn fail(&mut self, text: &str) -> Result<()> {
        let text = self.paint(text, Color::Red);
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    fn report(&mut self, err: &ZooError) -> Result<()> {
        tracing::warn!("Operation failed: {err}");
        self.fail(&format!("Error: {err}"))
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    fn print(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes())?;
        Ok(())
    }
}

fn non_blank(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
