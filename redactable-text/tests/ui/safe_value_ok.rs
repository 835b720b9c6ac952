use std::fmt;

use redactable_text::{Arg, SafeValue, sprint};

#[derive(SafeValue)]
struct Port(u16);

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(SafeValue)]
enum Level {
    Low,
    High,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Low => "low",
            Level::High => "high",
        })
    }
}

#[derive(SafeValue)]
struct Tagged<'a, T> {
    tag: &'a str,
    value: T,
}

impl<T: fmt::Display> fmt::Display for Tagged<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.tag, self.value)
    }
}

fn main() {
    let tagged = Tagged {
        tag: "level",
        value: Level::High,
    };
    let line = sprint([Arg::safe(&Port(8080)), Arg::safe(&tagged), Arg::safe(&Level::Low)]);
    assert_eq!(line.as_str(), "8080 level=high low");
}
