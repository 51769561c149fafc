//! Input flag parsing.

use std::ffi::OsString;
use std::path::PathBuf;

use wallcomp_platform_core::MAX_MONITORS;

/// One `-i INDEX=PATH` assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputArg {
    pub index: usize,
    pub path: PathBuf,
}

/// clap value parser for `INDEX=PATH`.
pub fn parse_input(value: &str) -> Result<InputArg, String> {
    let (index, path) = value
        .split_once('=')
        .ok_or_else(|| format!("expected INDEX=PATH, got `{value}`"))?;
    let index: usize = index
        .trim()
        .parse()
        .map_err(|_| format!("`{index}` is not a monitor index"))?;
    if index >= MAX_MONITORS {
        return Err(format!(
            "monitor index {index} is out of range (0..{MAX_MONITORS})"
        ));
    }
    if path.is_empty() {
        return Err(format!("no file path given for monitor {index}"));
    }
    Ok(InputArg {
        index,
        path: PathBuf::from(path),
    })
}

/// Rewrite the indexed form `-i3 PATH`, `-i3=PATH`, `--i3 PATH` into
/// `-i 3=PATH` so clap sees a single repeatable flag.
pub fn normalize_indexed_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let Some((index, inline)) = arg.to_str().and_then(split_indexed_flag) else {
            out.push(arg);
            continue;
        };

        let mut value = OsString::from(format!("{index}="));
        match inline {
            Some(path) => value.push(path),
            None => match args.next() {
                Some(path) => value.push(path),
                None => value = OsString::from(index),
            },
        }
        out.push(OsString::from("-i"));
        out.push(value);
    }
    out
}

/// `-i12` → `("12", None)`, `-i12=a.png` → `("12", Some("a.png"))`.
fn split_indexed_flag(arg: &str) -> Option<(&str, Option<&str>)> {
    let rest = arg
        .strip_prefix("--i")
        .or_else(|| arg.strip_prefix("-i"))?;
    let (index, inline) = match rest.split_once('=') {
        Some((index, path)) => (index, Some(path)),
        None => (rest, None),
    };
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((index, inline))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn parses_index_and_path() {
        assert_eq!(
            parse_input("2=C:/walls/left.png").unwrap(),
            InputArg {
                index: 2,
                path: PathBuf::from("C:/walls/left.png")
            }
        );
    }

    #[test]
    fn path_may_contain_equals() {
        let arg = parse_input("0=a=b.png").unwrap();
        assert_eq!(arg.path, PathBuf::from("a=b.png"));
    }

    #[test]
    fn rejects_malformed_inputs() {
        assert!(parse_input("left.png").is_err());
        assert!(parse_input("x=left.png").is_err());
        assert!(parse_input("256=left.png").is_err());
        assert!(parse_input("3=").is_err());
    }

    #[test]
    fn rewrites_indexed_flags() {
        let out = normalize_indexed_flags(os(&[
            "wallcomp", "-i0", "a.png", "--i1", "b.jpg", "-i2=c.png", "-o", "out.png",
        ]));
        assert_eq!(
            out,
            os(&["wallcomp", "-i", "0=a.png", "-i", "1=b.jpg", "-i", "2=c.png", "-o", "out.png"])
        );
    }

    #[test]
    fn leaves_other_flags_alone() {
        let args = os(&["wallcomp", "-i", "0=a.png", "--input", "1=b.png", "-v", "--layout", "x.json"]);
        assert_eq!(normalize_indexed_flags(args.clone()), args);
    }

    #[test]
    fn dangling_indexed_flag_is_left_for_clap_to_reject() {
        let out = normalize_indexed_flags(os(&["wallcomp", "-i3"]));
        assert_eq!(out, os(&["wallcomp", "-i", "3"]));
        assert!(parse_input("3").is_err());
    }
}
