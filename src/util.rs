use std::fmt::{self, Display};

/// Derives object name from namespace it lives in, `<namespace>-<suffix>`
pub fn scoped_name(namespace: &str, suffix: &str) -> String {
    format!("{}-{}", namespace, suffix)
}

/// Multiline text, printed with every line indented by a tab
#[derive(Debug)]
pub struct IdentStr(pub String);
impl Display for IdentStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.0.lines() {
            writeln!(f, "\t{}", line)?;
        }

        Ok(())
    }
}
