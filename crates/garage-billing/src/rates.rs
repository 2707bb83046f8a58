//! Hourly rates per category.

use garage_core::{Category, Cents};

/// Hourly rates, in cents per hour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateCard {
    /// Charged to any placard holder, whatever space they used.
    pub handicapped: Cents,
    /// Charged for a small space.
    pub small: Cents,
    /// Charged for a large space.
    pub large: Cents,
}

impl RateCard {
    /// $5.00 handicapped, $5.00 small, $7.50 large.
    pub const REFERENCE: RateCard = RateCard {
        handicapped: Cents(500),
        small: Cents(500),
        large: Cents(750),
    };

    /// Hourly rate for a stay.
    ///
    /// Placard holders always pay the handicapped rate. Everyone else pays
    /// by the *space* they occupied: a small car in a large space pays the
    /// large rate.
    pub fn hourly(&self, occupant: Category, space: Category) -> Cents {
        match (occupant, space) {
            (Category::Handicapped, _) => self.handicapped,
            (_, Category::Large) => self.large,
            (_, Category::Small | Category::Handicapped) => self.small,
        }
    }
}

impl Default for RateCard {
    fn default() -> Self {
        Self::REFERENCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placard_always_pays_handicapped_rate() {
        let rates = RateCard {
            handicapped: Cents(100),
            small: Cents(200),
            large: Cents(300),
        };
        for space in Category::ALL {
            assert_eq!(rates.hourly(Category::Handicapped, space), Cents(100));
        }
    }

    #[test]
    fn others_pay_by_space() {
        let rates = RateCard::REFERENCE;
        assert_eq!(rates.hourly(Category::Small, Category::Small), Cents(500));
        assert_eq!(rates.hourly(Category::Small, Category::Large), Cents(750));
        assert_eq!(rates.hourly(Category::Large, Category::Large), Cents(750));
    }
}
