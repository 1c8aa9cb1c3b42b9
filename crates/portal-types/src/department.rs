//! Department catalog and subscription sets.
//!
//! Departments are pure reference data: they have no owner and carry no
//! permission logic. The catalog is closed and fixed at compile time.
//!
//! A [`DepartmentSet`] is a bitflags set over the catalog, so it is always
//! a subset of the catalog and duplicate-free by construction.
//!
//! # Example
//!
//! ```
//! use portal_types::{DepartmentId, DepartmentSet};
//!
//! let mut subs = DepartmentSet::DEFAULT_SUBSCRIPTIONS;
//! assert!(subs.contains_department(DepartmentId::Hr));
//! assert!(subs.contains_department(DepartmentId::Sales));
//!
//! subs.toggle_department(DepartmentId::Finance);
//! assert!(subs.contains_department(DepartmentId::Finance));
//! ```

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier of a business unit in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepartmentId {
    /// Human resources.
    Hr,
    /// Finance. Carries financial data gated by a separate capability.
    Finance,
    /// Operations.
    Operations,
    /// Sales.
    Sales,
    /// Information technology.
    It,
}

impl DepartmentId {
    /// Every department, in catalog order.
    pub const ALL: [DepartmentId; 5] = [
        DepartmentId::Hr,
        DepartmentId::Finance,
        DepartmentId::Operations,
        DepartmentId::Sales,
        DepartmentId::It,
    ];

    /// Returns the canonical identifier string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hr => "hr",
            Self::Finance => "finance",
            Self::Operations => "operations",
            Self::Sales => "sales",
            Self::It => "it",
        }
    }

    /// Returns the single-member set for this department.
    #[must_use]
    pub const fn flag(self) -> DepartmentSet {
        match self {
            Self::Hr => DepartmentSet::HR,
            Self::Finance => DepartmentSet::FINANCE,
            Self::Operations => DepartmentSet::OPERATIONS,
            Self::Sales => DepartmentSet::SALES,
            Self::It => DepartmentSet::IT,
        }
    }

    /// Returns the catalog metadata for this department.
    #[must_use]
    pub fn metadata(self) -> &'static Department {
        // CATALOG is declared in DepartmentId::ALL order.
        &CATALOG[self as usize]
    }
}

impl fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A department identifier outside the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown department: '{0}'")]
pub struct UnknownDepartment(pub String);

impl FromStr for DepartmentId {
    type Err = UnknownDepartment;

    /// Parses a department id. Legacy Portuguese ids are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hr" | "rh" => Ok(Self::Hr),
            "finance" | "financeiro" => Ok(Self::Finance),
            "operations" | "operacoes" | "operações" => Ok(Self::Operations),
            "sales" | "vendas" => Ok(Self::Sales),
            "it" | "ti" => Ok(Self::It),
            _ => Err(UnknownDepartment(s.to_string())),
        }
    }
}

/// Catalog metadata for a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Department {
    /// Identifier.
    pub id: DepartmentId,
    /// Display name.
    pub name: &'static str,
    /// Short description of what the dashboard shows.
    pub description: &'static str,
}

/// The department catalog, in [`DepartmentId::ALL`] order.
pub static CATALOG: [Department; 5] = [
    Department {
        id: DepartmentId::Hr,
        name: "HR",
        description: "Headcount and recruiting metrics",
    },
    Department {
        id: DepartmentId::Finance,
        name: "Finance",
        description: "Revenue, expenses and cash flow",
    },
    Department {
        id: DepartmentId::Operations,
        name: "Operations",
        description: "Operational efficiency and projects",
    },
    Department {
        id: DepartmentId::Sales,
        name: "Sales",
        description: "Sales performance and targets",
    },
    Department {
        id: DepartmentId::It,
        name: "IT",
        description: "Infrastructure and systems",
    },
];

bitflags! {
    /// Unordered, duplicate-free set of departments.
    ///
    /// Used as a session's subscription set. Every bit maps to exactly one
    /// catalog entry, so no value of this type can name a department outside
    /// the catalog.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct DepartmentSet: u8 {
        /// Human resources.
        const HR         = 0b0000_0001;
        /// Finance.
        const FINANCE    = 0b0000_0010;
        /// Operations.
        const OPERATIONS = 0b0000_0100;
        /// Sales.
        const SALES      = 0b0000_1000;
        /// Information technology.
        const IT         = 0b0001_0000;
    }
}

impl DepartmentSet {
    /// Subscriptions every session starts with: `{hr, sales}`.
    pub const DEFAULT_SUBSCRIPTIONS: Self = Self::HR.union(Self::SALES);

    /// Builds a set from department ids. Duplicates collapse.
    #[must_use]
    pub fn from_departments<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = DepartmentId>,
    {
        ids.into_iter()
            .fold(Self::empty(), |set, id| set.union(id.flag()))
    }

    /// Returns `true` if the department is a member.
    #[must_use]
    pub fn contains_department(&self, id: DepartmentId) -> bool {
        self.contains(id.flag())
    }

    /// Flips membership of a department.
    pub fn toggle_department(&mut self, id: DepartmentId) {
        self.toggle(id.flag());
    }

    /// Iterates member departments in catalog order.
    pub fn departments(&self) -> impl Iterator<Item = DepartmentId> + '_ {
        DepartmentId::ALL
            .into_iter()
            .filter(move |id| self.contains_department(*id))
    }

    /// Number of member departments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bits().count_ones() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_order_matches_ids() {
        for (idx, id) in DepartmentId::ALL.into_iter().enumerate() {
            assert_eq!(CATALOG[idx].id, id);
            assert_eq!(id.metadata().id, id);
        }
    }

    #[test]
    fn parse_ids_and_legacy_ids() {
        for id in DepartmentId::ALL {
            assert_eq!(id.as_str().parse::<DepartmentId>(), Ok(id));
        }
        assert_eq!("rh".parse::<DepartmentId>(), Ok(DepartmentId::Hr));
        assert_eq!("Vendas".parse::<DepartmentId>(), Ok(DepartmentId::Sales));
        assert_eq!("ti".parse::<DepartmentId>(), Ok(DepartmentId::It));
        assert!("marketing".parse::<DepartmentId>().is_err());
    }

    #[test]
    fn default_subscriptions() {
        let subs = DepartmentSet::DEFAULT_SUBSCRIPTIONS;
        let members: Vec<_> = subs.departments().collect();
        assert_eq!(members, vec![DepartmentId::Hr, DepartmentId::Sales]);
        assert_eq!(subs.len(), 2);
    }

    #[test]
    fn from_departments_collapses_duplicates() {
        let set = DepartmentSet::from_departments([
            DepartmentId::It,
            DepartmentId::It,
            DepartmentId::Finance,
        ]);
        assert_eq!(set.len(), 2);
        assert_eq!(set, DepartmentSet::IT | DepartmentSet::FINANCE);
    }

    #[test]
    fn toggle_twice_restores_membership() {
        for id in DepartmentId::ALL {
            let mut set = DepartmentSet::DEFAULT_SUBSCRIPTIONS;
            set.toggle_department(id);
            set.toggle_department(id);
            assert_eq!(set, DepartmentSet::DEFAULT_SUBSCRIPTIONS);
        }
    }

    #[test]
    fn toggle_batch_is_order_independent() {
        let ids = [DepartmentId::Finance, DepartmentId::Hr, DepartmentId::It];

        let mut forward = DepartmentSet::DEFAULT_SUBSCRIPTIONS;
        ids.iter().for_each(|id| forward.toggle_department(*id));

        let mut backward = DepartmentSet::DEFAULT_SUBSCRIPTIONS;
        ids.iter().rev().for_each(|id| backward.toggle_department(*id));

        assert_eq!(forward, backward);
        assert_eq!(
            forward,
            DepartmentSet::FINANCE | DepartmentSet::SALES | DepartmentSet::IT
        );
    }

    #[test]
    fn all_is_full_catalog() {
        assert_eq!(DepartmentSet::all().len(), CATALOG.len());
        assert!(DepartmentSet::empty().departments().next().is_none());
    }
}
