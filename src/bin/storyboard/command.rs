//! Prompt command parsing.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};

use storyboard_editor::{AspectRatio, ImageStyle};

pub const HELP: &str = "\
Commands:
  style <realistic|cartoon|sketch>   set image style
  aspect <16:9|4:3|1:1>              set aspect ratio
  resolution <480..1080>             set resolution (step 120)
  describe <text>                    set the scene description
  add [text]                         generate a scene (uses the description if no text)
  up <n> | down <n>                  move scene n
  delete <n>                         delete scene n
  list                               show the storyboard
  preview                            show the full preview
  export [dir]                       write storyboard.txt
  input                              show the current input
  help                               this text
  quit                               leave";

/// One line typed at the prompt. Scene numbers are 1-based here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Style(ImageStyle),
    Aspect(AspectRatio),
    Resolution(u32),
    Describe(String),
    Add(Option<String>),
    Up(usize),
    Down(usize),
    Delete(usize),
    List,
    Preview,
    Export(Option<PathBuf>),
    Input,
    Help,
    Quit,
}

impl Command {
    /// Parses a prompt line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "style" => Command::Style(rest.parse()?),
            "aspect" => Command::Aspect(rest.parse()?),
            "resolution" | "res" => Command::Resolution(
                rest.trim_end_matches('p')
                    .parse()
                    .with_context(|| format!("not a resolution: {rest:?}"))?,
            ),
            "describe" => Command::Describe(rest.to_string()),
            "add" => Command::Add((!rest.is_empty()).then(|| rest.to_string())),
            "up" => Command::Up(scene_index(rest)?),
            "down" => Command::Down(scene_index(rest)?),
            "delete" | "rm" => Command::Delete(scene_index(rest)?),
            "list" | "ls" => Command::List,
            "preview" => Command::Preview,
            "export" => Command::Export((!rest.is_empty()).then(|| PathBuf::from(rest))),
            "input" => Command::Input,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => bail!("unknown command {other:?} (try `help`)"),
        };
        Ok(Some(command))
    }
}

/// Converts a 1-based scene number into a 0-based index.
fn scene_index(arg: &str) -> Result<usize> {
    let number: usize = arg
        .parse()
        .with_context(|| format!("expected a scene number, got {arg:?}"))?;
    number
        .checked_sub(1)
        .ok_or_else(|| anyhow!("scene numbers start at 1"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_settings() {
        assert_eq!(
            Command::parse("style Cartoon").unwrap(),
            Some(Command::Style(ImageStyle::Cartoon))
        );
        assert_eq!(
            Command::parse("aspect 1:1").unwrap(),
            Some(Command::Aspect(AspectRatio::Square))
        );
        assert_eq!(
            Command::parse("resolution 960p").unwrap(),
            Some(Command::Resolution(960))
        );
    }

    #[test]
    fn test_parse_add_keeps_text() {
        assert_eq!(
            Command::parse("add   A knight at dawn  ").unwrap(),
            Some(Command::Add(Some("A knight at dawn".to_string())))
        );
        assert_eq!(Command::parse("add").unwrap(), Some(Command::Add(None)));
    }

    #[test]
    fn test_scene_numbers_are_one_based() {
        assert_eq!(Command::parse("up 2").unwrap(), Some(Command::Up(1)));
        assert_eq!(Command::parse("delete 1").unwrap(), Some(Command::Delete(0)));
        assert!(Command::parse("down 0").is_err());
        assert!(Command::parse("delete x").is_err());
    }

    #[test]
    fn test_blank_and_unknown() {
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert!(Command::parse("render").is_err());
        assert!(Command::parse("style watercolor").is_err());
    }
}
