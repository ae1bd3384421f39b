use std::path::PathBuf;

const ARG_TARGET: &str = "target";
const ARG_SOURCE: &str = "source";
const ARG_OUT: &str = "out";
const ARG_CHECK: &str = "check";
const ARG_PROBE: &str = "probe";
const ARG_VERBOSE: &str = "verbose";

#[derive(Debug, Default)]
pub struct Args {
    pub target: Option<String>,
    pub source: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub check: bool,
    pub probe: bool,
    pub verbose: bool,
}

impl Args {
    pub fn parse(iterator: impl Iterator<Item = String>) -> Self {
        let vector: Vec<String> = iterator.collect();

        Self {
            target: Self::value_by_flag(ARG_TARGET, &vector),
            source: Self::value_by_flag(ARG_SOURCE, &vector).map(PathBuf::from),
            out: Self::value_by_flag(ARG_OUT, &vector).map(PathBuf::from),
            check: Self::has_flag(ARG_CHECK, &vector),
            probe: Self::has_flag(ARG_PROBE, &vector),
            verbose: Self::has_flag(ARG_VERBOSE, &vector),
        }
    }

    fn has_flag(flag: &str, i: &[String]) -> bool {
        i.iter().any(|e| {
            if e.starts_with("--") {
                let without_dashes = e.trim_start_matches("--");
                flag == without_dashes
            } else {
                false
            }
        })
    }

    fn value_by_flag(flag: &str, i: &[String]) -> Option<String> {
        let mut iter = i.iter().peekable();

        while let Some(arg) = iter.next() {
            if arg.starts_with("--") && arg.trim_start_matches("--") == flag {
                if let Some(next) = iter.peek() {
                    if !next.starts_with("--") {
                        return Some((*next).to_owned());
                    }
                }
                return None;
            }
        }

        None
    }
}
