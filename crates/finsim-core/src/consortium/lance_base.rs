//! Which amount a bid percentage is applied against.
//!
//! Administrators disagree on whether a fixed or free lance is quoted as a
//! share of the raw credit or of the category (credit inflated by the
//! administration fee and reserve fund). The embedded lance is always a share
//! of the raw credit. Every rule lives in [`select_bases`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Money;

/// Groups that CNP quotes the fixed lance against the category.
pub const CNP_CATEGORY_GROUPS: [&str; 2] = ["1021", "1053"];

/// Consortium administrator.
///
/// Unrecognised names are kept as [`Administrator::Unlisted`] and priced with
/// the fallback row of the table (both bases on raw credit).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Administrator {
    Cnp,
    Porto,
    Itau,
    Unlisted(String),
}

impl Administrator {
    pub fn is_listed(&self) -> bool {
        !matches!(self, Administrator::Unlisted(_))
    }
}

impl From<&str> for Administrator {
    fn from(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "cnp" => Administrator::Cnp,
            "porto" | "porto seguro" => Administrator::Porto,
            "itau" | "itaú" => Administrator::Itau,
            _ => Administrator::Unlisted(name.trim().to_string()),
        }
    }
}

impl From<String> for Administrator {
    fn from(name: String) -> Self {
        Administrator::from(name.as_str())
    }
}

impl From<Administrator> for String {
    fn from(admin: Administrator) -> Self {
        admin.to_string()
    }
}

impl fmt::Display for Administrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Administrator::Cnp => write!(f, "CNP"),
            Administrator::Porto => write!(f, "Porto"),
            Administrator::Itau => write!(f, "Itaú"),
            Administrator::Unlisted(name) => write!(f, "{name}"),
        }
    }
}

/// The amount a bid percentage is applied against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BidBase {
    /// The credit letter value.
    Credit,
    /// Credit plus administration fee and reserve fund.
    Category,
}

impl BidBase {
    pub fn resolve(&self, credit: Money, category: Money) -> Money {
        match self {
            BidBase::Credit => credit,
            BidBase::Category => category,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanceBases {
    pub fixed_bid: BidBase,
    pub free_bid: BidBase,
}

/// The lance base table.
///
/// | administrator | group        | fixed    | free     |
/// |---------------|--------------|----------|----------|
/// | CNP           | 1021, 1053   | category | credit   |
/// | CNP           | other        | credit   | credit   |
/// | Porto         | any          | category | category |
/// | Itaú          | any          | credit   | credit   |
/// | unlisted      | any          | credit   | credit   |
pub fn select_bases(administrator: &Administrator, group: Option<&str>) -> LanceBases {
    use self::BidBase::{Category, Credit};

    let (fixed_bid, free_bid) = match administrator {
        Administrator::Cnp if is_cnp_category_group(group) => (Category, Credit),
        Administrator::Cnp => (Credit, Credit),
        Administrator::Porto => (Category, Category),
        Administrator::Itau => (Credit, Credit),
        Administrator::Unlisted(_) => (Credit, Credit),
    };

    LanceBases {
        fixed_bid,
        free_bid,
    }
}

/// Base used to express the total lance as a share of the group
/// ("representatividade"): the category for Porto, raw credit otherwise.
pub fn representativeness_base(administrator: &Administrator) -> BidBase {
    match administrator {
        Administrator::Porto => BidBase::Category,
        _ => BidBase::Credit,
    }
}

fn is_cnp_category_group(group: Option<&str>) -> bool {
    group.is_some_and(|g| CNP_CATEGORY_GROUPS.contains(&g.trim()))
}
