//! Expense category definitions.

use serde::{Deserialize, Serialize};

/// Fixed enumeration of expense categories accepted by the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseType {
    /// Travel expenses.
    #[default]
    #[serde(rename = "Transports")]
    Transports,
    /// Restaurant and bar expenses.
    #[serde(rename = "Restaurants et bars")]
    RestaurantsEtBars,
    /// Hotel and accommodation expenses.
    #[serde(rename = "Hôtel et logement")]
    HotelEtLogement,
    /// Online service subscriptions.
    #[serde(rename = "Services en ligne")]
    ServicesEnLigne,
    /// IT and electronics purchases.
    #[serde(rename = "IT et électronique")]
    ItEtElectronique,
    /// Equipment and hardware purchases.
    #[serde(rename = "Equipement et matériel")]
    EquipementEtMateriel,
    /// Office supplies.
    #[serde(rename = "Fournitures de bureau")]
    FournituresDeBureau,
}

impl ExpenseType {
    /// All categories, in the order the submission form lists them.
    pub const ALL: [Self; 7] = [
        Self::Transports,
        Self::RestaurantsEtBars,
        Self::HotelEtLogement,
        Self::ServicesEnLigne,
        Self::ItEtElectronique,
        Self::EquipementEtMateriel,
        Self::FournituresDeBureau,
    ];

    /// Returns the service-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Transports => "Transports",
            Self::RestaurantsEtBars => "Restaurants et bars",
            Self::HotelEtLogement => "Hôtel et logement",
            Self::ServicesEnLigne => "Services en ligne",
            Self::ItEtElectronique => "IT et électronique",
            Self::EquipementEtMateriel => "Equipement et matériel",
            Self::FournituresDeBureau => "Fournitures de bureau",
        }
    }

    /// Looks a category up by its service-facing label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }

    /// Returns the next category in form order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Returns the previous category in form order, wrapping around.
    #[must_use]
    pub fn previous(self) -> Self {
        let index = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        for expense_type in ExpenseType::ALL {
            assert_eq!(
                ExpenseType::from_label(expense_type.label()),
                Some(expense_type)
            );
        }
    }

    #[test]
    fn test_unknown_label() {
        assert_eq!(ExpenseType::from_label("Cadeaux"), None);
    }

    #[test]
    fn test_serializes_to_service_label() {
        let json = serde_json::to_string(&ExpenseType::HotelEtLogement).unwrap();
        assert_eq!(json, "\"Hôtel et logement\"");
    }

    #[test]
    fn test_next_wraps_around() {
        let mut current = ExpenseType::Transports;
        for _ in 0..ExpenseType::ALL.len() {
            current = current.next();
        }
        assert_eq!(current, ExpenseType::Transports);
    }

    #[test]
    fn test_previous_is_inverse_of_next() {
        for expense_type in ExpenseType::ALL {
            assert_eq!(expense_type.next().previous(), expense_type);
        }
    }
}
