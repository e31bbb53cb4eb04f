//! Portal metadata: disease groups and the phenotypes they expose.
//!
//! These reads go straight to the portal database and never touch object
//! storage.

use crate::error::Result;
use bioindex_commons::GroupSet;
use bioindex_store::{quote_identifier, IndexStore, SqlRow, SqlValue, Statement};
use serde::Serialize;
use std::sync::Arc;

const DISEASE_GROUPS: &str = "DiseaseGroups";
const PHENOTYPES: &str = "Phenotypes";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiseaseGroup {
    pub name: String,
    pub default: bool,
    pub description: Option<String>,
    pub hostname: Option<String>,
}

impl DiseaseGroup {
    fn from_row(row: &SqlRow) -> Option<Self> {
        Some(Self {
            name: text(row, "name")?,
            default: row.get("default").and_then(SqlValue::to_bool).unwrap_or(false),
            description: text(row, "description"),
            hostname: text(row, "hostname"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Phenotype {
    pub name: String,
    pub description: Option<String>,
    pub group: Option<String>,
    pub dichotomous: Option<bool>,
}

impl Phenotype {
    fn from_row(row: &SqlRow) -> Option<Self> {
        Some(Self {
            name: text(row, "name")?,
            description: text(row, "description"),
            group: text(row, "group"),
            dichotomous: row.get("dichotomous").and_then(SqlValue::to_bool),
        })
    }
}

fn text(row: &SqlRow, column: &str) -> Option<String> {
    row.get(column).and_then(SqlValue::to_text)
}

pub struct PortalService {
    store: Arc<dyn IndexStore>,
}

impl PortalService {
    pub fn new(store: Arc<dyn IndexStore>) -> Self {
        Self { store }
    }

    /// All distinct disease groups.
    pub async fn disease_groups(&self) -> Result<Vec<DiseaseGroup>> {
        let statement = Statement::new(format!(
            "SELECT DISTINCT {}, {}, {}, {} FROM {}",
            quote_identifier("name"),
            quote_identifier("description"),
            quote_identifier("default"),
            quote_identifier("hostname"),
            quote_identifier(DISEASE_GROUPS),
        ));
        let rows = self.store.query(statement).await?;
        Ok(rows.iter().filter_map(DiseaseGroup::from_row).collect())
    }

    /// Phenotypes visible to disease group `group`, or all of them when
    /// `group` is absent or blank.
    ///
    /// A group without an allow-list sees every phenotype; an unknown group
    /// sees none.
    pub async fn phenotypes(&self, group: Option<&str>) -> Result<Vec<Phenotype>> {
        let group = group.map(str::trim).filter(|g| !g.is_empty());

        let allowed = match group {
            None => GroupSet::All,
            Some(name) => match self.group_allow_list(name).await? {
                Some(allowed) => allowed,
                None => {
                    log::debug!("Unknown disease group {}", name);
                    return Ok(Vec::new());
                }
            },
        };

        let mut sql = format!(
            "SELECT {}, {}, {}, {} FROM {}",
            quote_identifier("name"),
            quote_identifier("description"),
            quote_identifier("group"),
            quote_identifier("dichotomous"),
            quote_identifier(PHENOTYPES),
        );
        let mut statement_params = Vec::new();

        if let Some(members) = allowed.members() {
            if members.is_empty() {
                return Ok(Vec::new());
            }
            sql.push_str(&format!(
                " WHERE {} IN ({})",
                quote_identifier("group"),
                vec!["?"; members.len()].join(", ")
            ));
            statement_params.extend(members.iter().cloned());
        }

        let statement = statement_params
            .into_iter()
            .fold(Statement::new(sql), |stmt, member| stmt.bind(member));
        let rows = self.store.query(statement).await?;
        Ok(rows.iter().filter_map(Phenotype::from_row).collect())
    }

    /// `None` when the group does not exist.
    async fn group_allow_list(&self, name: &str) -> Result<Option<GroupSet>> {
        let statement = Statement::new(format!(
            "SELECT {} FROM {} WHERE {} = ? LIMIT 1",
            quote_identifier("groups"),
            quote_identifier(DISEASE_GROUPS),
            quote_identifier("name"),
        ))
        .bind(name);

        let rows = self.store.query(statement).await?;
        Ok(rows.first().map(|row| {
            let list = row.get("groups").and_then(SqlValue::to_text);
            GroupSet::parse(list.as_deref())
        }))
    }
}
