//! Open-mode strings.
//!
//! Endpoints take the conventional mode strings used by file APIs:
//!
//! ```text
//! mode ::= [rwax][b|t]?[+]?
//! ```
//!
//! - `r`: read (default)
//! - `w`: write, truncating
//! - `a`: write, appending
//! - `x`: exclusive creation, fail if the target exists
//! - `b`: binary, contents are raw bytes
//! - `t`: text (default), contents are decoded with the endpoint codec
//! - `+`: update, read and write

use std::fmt;

use crate::error::IoflowError;

/// Parsed open mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenMode {
    pub read: bool,
    pub write: bool,
    pub append: bool,
    pub exclusive: bool,
    pub truncate: bool,
    /// Binary mode (false = text mode)
    pub binary: bool,
}

impl Default for OpenMode {
    fn default() -> Self {
        Self {
            read: true,
            write: false,
            append: false,
            exclusive: false,
            truncate: false,
            binary: false,
        }
    }
}

impl OpenMode {
    /// Parse a mode string such as `r`, `rb`, `w+` or `ab`.
    pub fn parse(mode: &str) -> Result<Self, IoflowError> {
        let invalid = |reason: &str| IoflowError::InvalidMode {
            mode: mode.to_string(),
            reason: reason.to_string(),
        };

        let mut result = OpenMode {
            read: false,
            ..OpenMode::default()
        };
        let mut primary = None;
        let mut seen_bt = false;
        let mut seen_plus = false;

        for c in mode.chars() {
            match c {
                'r' | 'w' | 'a' | 'x' => {
                    if primary.is_some() {
                        return Err(invalid("more than one of r, w, a, x"));
                    }
                    primary = Some(c);
                    match c {
                        'r' => result.read = true,
                        'w' => {
                            result.write = true;
                            result.truncate = true;
                        }
                        'a' => {
                            result.write = true;
                            result.append = true;
                        }
                        _ => {
                            result.write = true;
                            result.exclusive = true;
                        }
                    }
                }
                'b' | 't' => {
                    if seen_bt {
                        return Err(invalid("binary and text flags given twice"));
                    }
                    seen_bt = true;
                    result.binary = c == 'b';
                }
                '+' => {
                    if seen_plus {
                        return Err(invalid("'+' given twice"));
                    }
                    seen_plus = true;
                    result.read = true;
                    result.write = true;
                }
                other => return Err(invalid(&format!("unexpected character '{other}'"))),
            }
        }

        if primary.is_none() {
            return Err(invalid("must contain one of r, w, a, x"));
        }

        Ok(result)
    }

    pub const fn creates(&self) -> bool {
        self.write && !self.exclusive && !(self.read && !self.truncate && !self.append)
    }

    /// Convert to `std::fs::OpenOptions` flags.
    pub fn to_open_options(&self) -> std::fs::OpenOptions {
        let mut opts = std::fs::OpenOptions::new();
        opts.read(self.read)
            .write(self.write && !self.append)
            .append(self.append)
            .truncate(self.truncate)
            .create(self.creates())
            .create_new(self.exclusive);
        opts
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let primary = if self.exclusive {
            'x'
        } else if self.append {
            'a'
        } else if self.truncate {
            'w'
        } else {
            'r'
        };
        write!(f, "{primary}")?;
        if self.binary {
            write!(f, "b")?;
        }
        if self.read && self.write {
            write!(f, "+")?;
        }
        Ok(())
    }
}
