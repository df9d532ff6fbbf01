//! LaTeX rendering of person records
//!
//! The output uses the key/value vocabulary of genealogytree nodes:
//!
//! ```text
//! male, name = {Gianni \nick{Capusso} \surn{Armani}}
//! birth = {2000}{?}
//! death = {3/03/2100 [99-100]}{?}
//! ```
//!
//! Every key is always written; unknown values become `{?}` so the macro
//! arguments keep their positions. Values are copied verbatim, which lets
//! records carry their own LaTeX (`\pove`, `\register{...}`).

use crate::person::Person;

const UNKNOWN: &str = "?";

/// Optional lines beyond the name, birth and death entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Append `profession = {\work{...}}{...}` when a work is recorded
    pub occupation: bool,
    /// Append `comment = {...}` when a comment is recorded
    pub comment: bool,
}

impl RenderOptions {
    /// Every optional line enabled
    pub fn full() -> Self {
        Self {
            occupation: true,
            comment: true,
        }
    }
}

/// Which end of a life an entry describes
#[derive(Debug, Clone, Copy)]
enum Event {
    Birth,
    Death,
}

impl Event {
    fn key(self, extended: bool) -> &'static str {
        match (self, extended) {
            (Event::Birth, false) => "birth",
            (Event::Birth, true) => "birth+",
            (Event::Death, false) => "death",
            (Event::Death, true) => "death+",
        }
    }
}

/// Render the sex/name, birth and death lines of a person
pub fn render(person: &Person) -> String {
    render_with(person, &RenderOptions::default())
}

/// Render a person, adding the optional lines selected in `options`
pub fn render_with(person: &Person, options: &RenderOptions) -> String {
    let mut out = String::new();
    let mut line = |text: String| {
        out.push_str(&text);
        out.push('\n');
    };

    line(name_line(person));
    line(event_line(person, Event::Birth));
    line(event_line(person, Event::Death));

    if options.occupation {
        if let Some(work) = person.work() {
            line(format!(
                "profession = {{\\work{{{}}}}}{}",
                work,
                braced(person.work_details())
            ));
        }
    }
    if options.comment {
        if let Some(comment) = person.comment() {
            line(format!("comment = {{{}}}", comment));
        }
    }

    out
}

fn name_line(person: &Person) -> String {
    let sex = person.sex().map(|s| format!("{}, ", s)).unwrap_or_default();
    let nickname = person
        .nickname()
        .map(|n| format!("\\nick{{{}}} ", n))
        .unwrap_or_default();

    format!(
        "{}name = {{{} {}\\surn{{{}}}}}",
        sex,
        person.name().unwrap_or(UNKNOWN),
        nickname,
        person.surname().unwrap_or(UNKNOWN)
    )
}

/// `key = {date [age]}{details}{plus}`
///
/// The age goes on the death date when there is one, otherwise on the birth
/// date. The `{plus}` group is only written when the extra entry exists.
fn event_line(person: &Person, event: Event) -> String {
    let (date, details, plus) = match event {
        Event::Birth => (person.birth_date(), person.birth_details(), person.birth_plus()),
        Event::Death => (person.death_date(), person.death_details(), person.death_plus()),
    };

    let carries_age = match event {
        Event::Birth => person.death_date().is_none(),
        Event::Death => person.death_date().is_some(),
    };

    let date = match (date, person.age_text()) {
        (Some(date), Some(age)) if carries_age => format!("{{{} [{}]}}", date, age),
        (date, _) => braced(date),
    };
    let plus_group = plus.map(|p| format!("{{{}}}", p)).unwrap_or_default();

    format!(
        "{} = {}{}{}",
        event.key(plus.is_some()),
        date,
        braced(details),
        plus_group
    )
}

fn braced(value: Option<&str>) -> String {
    format!("{{{}}}", value.unwrap_or(UNKNOWN))
}
