pub mod generator;
pub mod repo;

use std::fmt;

/// Pass tiers sold for the event. `Regular` passes are priced per selected
/// event; the named tiers carry a fixed price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketType {
    Regular,
    Solo,
    Duo,
    Trio,
    Quadro,
}

impl TicketType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketType::Regular => "regular",
            TicketType::Solo => "Solo",
            TicketType::Duo => "Duo",
            TicketType::Trio => "Trio",
            TicketType::Quadro => "Quadro",
        }
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    Active,
    Used,
    Cancelled,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Active => "active",
            TicketStatus::Used => "used",
            TicketStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // text forms must match the CHECK constraints in the tickets migration
    #[test]
    fn enum_text_forms_match_schema() {
        assert_eq!(TicketType::Regular.as_str(), "regular");
        assert_eq!(TicketType::Solo.to_string(), "Solo");
        assert_eq!(TicketType::Duo.to_string(), "Duo");
        assert_eq!(TicketType::Trio.to_string(), "Trio");
        assert_eq!(TicketType::Quadro.to_string(), "Quadro");

        assert_eq!(TicketStatus::Active.as_str(), "active");
        assert_eq!(TicketStatus::Used.to_string(), "used");
        assert_eq!(TicketStatus::Cancelled.to_string(), "cancelled");
    }
}
