//! Role, resource and action vocabulary for access control

use serde::{Deserialize, Serialize};
use std::fmt;

/// Back-office role. Every user has exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Administrator,
    Developer,
    Supervisor,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Administrator, Role::Developer, Role::Supervisor];

    /// Parse a stored role token.
    ///
    /// Accepts the canonical names and the legacy tokens written by the
    /// previous system (`Administrador`, `Desarrollador`). Case-sensitive.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "Administrator" | "Administrador" => Some(Role::Administrator),
            "Developer" | "Desarrollador" => Some(Role::Developer),
            "Supervisor" => Some(Role::Supervisor),
            _ => None,
        }
    }

    /// Canonical token, as written to the user table.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "Administrator",
            Role::Developer => "Developer",
            Role::Supervisor => "Supervisor",
        }
    }

    /// Human-facing name
    pub const fn display_name(&self) -> &'static str {
        match self {
            Role::Administrator => "Administrator",
            Role::Developer => "Developer",
            Role::Supervisor => "Supervisor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bank entity categories subject to access control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    Branch,
    Employee,
    Client,
    Account,
    Transaction,
    Loan,
    CreditCard,
    User,
}

impl ResourceType {
    /// Menu order
    pub const ALL: [ResourceType; 8] = [
        ResourceType::Branch,
        ResourceType::Employee,
        ResourceType::Client,
        ResourceType::Account,
        ResourceType::Transaction,
        ResourceType::Loan,
        ResourceType::CreditCard,
        ResourceType::User,
    ];

    /// Parse a resource token (canonical name or legacy table name).
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "Branch" | "Sucursal" => Some(ResourceType::Branch),
            "Employee" | "Empleado" => Some(ResourceType::Employee),
            "Client" | "Cliente" => Some(ResourceType::Client),
            "Account" | "Cuenta" => Some(ResourceType::Account),
            "Transaction" | "Transaccion" => Some(ResourceType::Transaction),
            "Loan" | "Prestamo" => Some(ResourceType::Loan),
            "CreditCard" | "TarjetaCredito" => Some(ResourceType::CreditCard),
            "User" | "Usuario" => Some(ResourceType::User),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Branch => "Branch",
            ResourceType::Employee => "Employee",
            ResourceType::Client => "Client",
            ResourceType::Account => "Account",
            ResourceType::Transaction => "Transaction",
            ResourceType::Loan => "Loan",
            ResourceType::CreditCard => "CreditCard",
            ResourceType::User => "User",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CRUD action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Create, Action::Read, Action::Update, Action::Delete];

    /// Parse either the single-letter form (`C`, `R`, `U`, `D`) or the full name.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "C" | "Create" => Some(Action::Create),
            "R" | "Read" => Some(Action::Read),
            "U" | "Update" => Some(Action::Update),
            "D" | "Delete" => Some(Action::Delete),
            _ => None,
        }
    }

    pub const fn letter(&self) -> char {
        match self {
            Action::Create => 'C',
            Action::Read => 'R',
            Action::Update => 'U',
            Action::Delete => 'D',
        }
    }

    const fn bit(&self) -> u8 {
        match self {
            Action::Create => 0b0001,
            Action::Read => 0b0010,
            Action::Update => 0b0100,
            Action::Delete => 0b1000,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Create => "Create",
            Action::Read => "Read",
            Action::Update => "Update",
            Action::Delete => "Delete",
        };
        f.write_str(name)
    }
}

/// Set of allowed actions on one resource.
///
/// Serializes as the letters it contains in `CRUD` order, e.g. `"R"` or `"CRUD"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ActionSet(u8);

impl ActionSet {
    pub const NONE: ActionSet = ActionSet(0);
    pub const READ: ActionSet = ActionSet(0b0010);
    pub const CRUD: ActionSet = ActionSet(0b1111);

    pub const fn contains(&self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn with(self, action: Action) -> Self {
        ActionSet(self.0 | action.bit())
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        Action::ALL.into_iter().filter(|a| self.contains(*a))
    }

    /// Letters in `CRUD` order
    pub fn letters(&self) -> String {
        self.iter().map(|a| a.letter()).collect()
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        iter.into_iter().fold(ActionSet::NONE, ActionSet::with)
    }
}

impl Serialize for ActionSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.letters())
    }
}

impl<'de> Deserialize<'de> for ActionSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.chars()
            .map(|c| {
                Action::parse(&c.to_string())
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid action letter: {c}")))
            })
            .collect()
    }
}
