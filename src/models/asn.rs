//! Autonomous System Number identifiers.

use regex::Regex;
use std::error::Error;
use std::str::FromStr;
use std::sync::OnceLock;

/// Accepts `AS19318`, `as19318` or a bare `19318`.
static ASN_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_asn_regex() -> &'static Regex {
    ASN_REGEX.get_or_init(|| Regex::new(r"^(?i:AS)?(\d{1,10})$").expect("Invalid Regex"))
}

/// An Autonomous System Number.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Asn(pub u32);

impl Asn {
    /// Lower-case name used for feed file names, e.g. `as19318`.
    pub fn file_stem(&self) -> String {
        format!("as{}", self.0)
    }
}

impl FromStr for Asn {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Asn, Self::Err> {
        let s = s.trim();
        let caps = get_asn_regex()
            .captures(s)
            .ok_or_else(|| format!("Invalid ASN '{s}'"))?;
        let number: u32 = caps[1]
            .parse()
            .map_err(|_| format!("ASN out of range '{s}'"))?;
        Ok(Asn(number))
    }
}

impl std::fmt::Display for Asn {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "AS{}", self.0)
    }
}
