// src/client/view.rs

use std::fmt;

use crate::client::reconcile::{DisplayEntity, Status};

/// "1 entreprise trouvée", otherwise plural (including zero).
pub fn results_summary(count: usize) -> String {
    if count == 1 {
        "1 entreprise trouvée".to_string()
    } else {
        format!("{count} entreprises trouvées")
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Active => f.write_str("Active"),
            Status::Inactive => f.write_str("Fermée"),
        }
    }
}

impl fmt::Display for DisplayEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} [{}]", self.name, self.status)?;
        write!(f, "{}: {}", self.identifier_label.as_str(), self.identifier)?;

        match (&self.activity_code, &self.activity_label) {
            (Some(code), Some(label)) => write!(f, "\nActivité: {code} ({label})")?,
            (Some(code), None) => write!(f, "\nActivité: {code}")?,
            (None, Some(label)) => write!(f, "\nActivité: {label}")?,
            (None, None) => {}
        }
        if let Some(locality) = &self.locality {
            write!(f, "\nCommune: {locality}")?;
        }
        write!(
            f,
            "\nTranche d'effectif: {}",
            self.employee_bracket.as_deref().unwrap_or("non renseignée")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::reconcile::IdentifierLabel;

    #[test]
    fn summary_is_singular_only_for_one() {
        assert_eq!(results_summary(0), "0 entreprises trouvées");
        assert_eq!(results_summary(1), "1 entreprise trouvée");
        assert_eq!(results_summary(20), "20 entreprises trouvées");
    }

    #[test]
    fn card_lists_identifier_and_activity() {
        let entity = DisplayEntity {
            name: "ACME".to_string(),
            identifier_label: IdentifierLabel::Siret,
            identifier: "73282932000074".to_string(),
            activity_code: Some("62.01Z".to_string()),
            activity_label: Some("Programmation informatique".to_string()),
            employee_bracket: None,
            locality: Some("PARIS".to_string()),
            status: Status::Active,
        };

        assert_eq!(
            entity.to_string(),
            "ACME [Active]\nSIRET: 73282932000074\nActivité: 62.01Z (Programmation informatique)\nCommune: PARIS\nTranche d'effectif: non renseignée"
        );
    }
}
