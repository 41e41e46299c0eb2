//! Merges a search result or an establishment with its parent company into the
//! single view a result card shows.

use crate::models::company::{Etablissement, SearchRow, UniteLegale};

/// Name shown when neither record carries one.
pub const NO_NAME: &str = "Pas de Nom";

/// Record a result card starts from.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Establishment(Etablissement),
    LegalUnit(UniteLegale),
    /// Joined row of `/api/search`.
    SearchResult(SearchRow),
}

impl Entity {
    /// Siren of the parent company to fetch, if the record points at one.
    pub fn parent_siren(&self) -> Option<&str> {
        match self {
            Entity::Establishment(e) => present(Some(&e.siren)),
            Entity::SearchResult(row) => present(Some(&row.siren)),
            Entity::LegalUnit(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierLabel {
    Siret,
    Siren,
}

impl IdentifierLabel {
    pub const fn as_str(self) -> &'static str {
        match self {
            IdentifierLabel::Siret => "SIRET",
            IdentifierLabel::Siren => "SIREN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Active,
    Inactive,
}

impl Status {
    fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("A") => Status::Active,
            _ => Status::Inactive,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayEntity {
    pub name: String,
    pub identifier_label: IdentifierLabel,
    pub identifier: String,
    pub activity_code: Option<String>,
    pub activity_label: Option<String>,
    pub employee_bracket: Option<String>,
    pub locality: Option<String>,
    pub status: Status,
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn first_present<'a>(candidates: &[Option<&'a String>]) -> Option<&'a str> {
    candidates.iter().find_map(|c| present(*c))
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

fn parent_names(parent: Option<&UniteLegale>) -> [Option<&String>; 3] {
    [
        parent.and_then(|p| p.denominationunitelegale.as_ref()),
        parent.and_then(|p| p.nomusageunitelegale.as_ref()),
        parent.and_then(|p| p.nomunitelegale.as_ref()),
    ]
}

/// `parent` is ignored for a [`Entity::LegalUnit`], which is its own parent.
/// Name, activity, employee bracket and status come from the entity first and
/// then from the parent; empty strings count as absent.
pub fn reconcile(entity: &Entity, parent: Option<&UniteLegale>) -> DisplayEntity {
    match entity {
        Entity::Establishment(e) => {
            let [denomination, usage, legal] = parent_names(parent);
            let name = first_present(&[
                e.denominationusuelleetablissement.as_ref(),
                denomination,
                usage,
                legal,
            ]);

            DisplayEntity {
                name: name.unwrap_or(NO_NAME).to_string(),
                identifier_label: IdentifierLabel::Siret,
                identifier: e.siret.clone(),
                activity_code: owned(first_present(&[
                    e.activiteprincipaleetablissement.as_ref(),
                    parent.and_then(|p| p.activiteprincipaleunitelegale.as_ref()),
                ])),
                activity_label: None,
                employee_bracket: owned(first_present(&[
                    e.trancheeffectifsetablissement.as_ref(),
                    parent.and_then(|p| p.trancheeffectifsunitelegale.as_ref()),
                ])),
                locality: None,
                status: Status::from_code(first_present(&[
                    e.etatadministratifetablissement.as_ref(),
                    parent.and_then(|p| p.etatadministratifunitelegale.as_ref()),
                ])),
            }
        }
        Entity::LegalUnit(unit) => {
            let [denomination, usage, legal] = parent_names(Some(unit));

            DisplayEntity {
                name: first_present(&[denomination, usage, legal]).unwrap_or(NO_NAME).to_string(),
                identifier_label: IdentifierLabel::Siren,
                identifier: unit.siren.clone(),
                activity_code: owned(present(unit.activiteprincipaleunitelegale.as_ref())),
                activity_label: None,
                employee_bracket: owned(present(unit.trancheeffectifsunitelegale.as_ref())),
                locality: None,
                status: Status::from_code(present(unit.etatadministratifunitelegale.as_ref())),
            }
        }
        Entity::SearchResult(row) => {
            let [denomination, usage, legal] = parent_names(parent);
            let name = first_present(&[
                row.denominationunitelegale.as_ref(),
                denomination,
                usage,
                legal,
            ]);

            let (identifier_label, identifier) = match present(row.siret.as_ref()) {
                Some(siret) => (IdentifierLabel::Siret, siret.to_string()),
                None => (IdentifierLabel::Siren, row.siren.clone()),
            };

            DisplayEntity {
                name: name.unwrap_or(NO_NAME).to_string(),
                identifier_label,
                identifier,
                activity_code: owned(first_present(&[
                    row.activiteprincipaleetablissement.as_ref(),
                    parent.and_then(|p| p.activiteprincipaleunitelegale.as_ref()),
                ])),
                activity_label: owned(present(row.activite_nom.as_ref())),
                employee_bracket: owned(present(
                    parent.and_then(|p| p.trancheeffectifsunitelegale.as_ref()),
                )),
                locality: owned(present(row.libellecommuneetablissement.as_ref())),
                status: Status::from_code(present(
                    parent.and_then(|p| p.etatadministratifunitelegale.as_ref()),
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    fn acme() -> UniteLegale {
        UniteLegale {
            siren: "732829320".to_string(),
            denominationunitelegale: some("ACME"),
            activiteprincipaleunitelegale: some("62.01Z"),
            trancheeffectifsunitelegale: some("12"),
            etatadministratifunitelegale: some("A"),
            ..UniteLegale::default()
        }
    }

    fn establishment() -> Etablissement {
        Etablissement {
            siret: "73282932000074".to_string(),
            siren: "732829320".to_string(),
            ..Etablissement::default()
        }
    }

    #[test]
    fn empty_usage_name_falls_back_to_parent() {
        let mut e = establishment();
        e.denominationusuelleetablissement = some("");

        let view = reconcile(&Entity::Establishment(e), Some(&acme()));
        assert_eq!(view.name, "ACME");
        assert_eq!(view.identifier_label, IdentifierLabel::Siret);
        assert_eq!(view.identifier, "73282932000074");
    }

    #[test]
    fn placeholder_when_no_name_resolves() {
        let mut e = establishment();
        e.denominationusuelleetablissement = some("");
        let parent = UniteLegale {
            denominationunitelegale: some(""),
            ..UniteLegale::default()
        };

        assert_eq!(reconcile(&Entity::Establishment(e.clone()), Some(&parent)).name, NO_NAME);
        assert_eq!(reconcile(&Entity::Establishment(e), None).name, NO_NAME);
    }

    #[test]
    fn parent_names_are_tried_in_order() {
        let parent = UniteLegale {
            nomusageunitelegale: some(" "),
            nomunitelegale: some("DUPONT"),
            ..UniteLegale::default()
        };
        let view = reconcile(&Entity::Establishment(establishment()), Some(&parent));
        assert_eq!(view.name, "DUPONT");
    }

    #[test]
    fn primary_record_wins_over_parent() {
        let mut e = establishment();
        e.denominationusuelleetablissement = some("ACME Lyon");
        e.activiteprincipaleetablissement = some("47.11A");
        e.etatadministratifetablissement = some("F");

        let view = reconcile(&Entity::Establishment(e), Some(&acme()));
        assert_eq!(view.name, "ACME Lyon");
        assert_eq!(view.activity_code.as_deref(), Some("47.11A"));
        assert_eq!(view.employee_bracket.as_deref(), Some("12"));
        assert_eq!(view.status, Status::Inactive);
    }

    #[test]
    fn status_defaults_to_inactive() {
        let view = reconcile(&Entity::Establishment(establishment()), None);
        assert_eq!(view.status, Status::Inactive);

        let view = reconcile(&Entity::Establishment(establishment()), Some(&acme()));
        assert_eq!(view.status, Status::Active);
    }

    #[test]
    fn legal_unit_uses_siren() {
        let view = reconcile(&Entity::LegalUnit(acme()), None);
        assert_eq!(view.identifier_label, IdentifierLabel::Siren);
        assert_eq!(view.identifier, "732829320");
        assert_eq!(view.name, "ACME");
        assert_eq!(view.status, Status::Active);
        assert_eq!(Entity::LegalUnit(acme()).parent_siren(), None);
    }

    #[test]
    fn search_row_without_site_shows_siren() {
        let row = SearchRow {
            siren: "732829320".to_string(),
            activite_nom: some("Programmation informatique"),
            ..SearchRow::default()
        };
        let entity = Entity::SearchResult(row);
        assert_eq!(entity.parent_siren(), Some("732829320"));

        let view = reconcile(&entity, Some(&acme()));
        assert_eq!(view.identifier_label, IdentifierLabel::Siren);
        assert_eq!(view.name, "ACME");
        assert_eq!(view.activity_code.as_deref(), Some("62.01Z"));
        assert_eq!(view.activity_label.as_deref(), Some("Programmation informatique"));
    }
}
