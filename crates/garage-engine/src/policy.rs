//! Slot selection policy.
//!
//! [`select_slot`] is a pure function of the occupancy table: it never
//! mutates, so a failed request leaves the garage untouched.
//!
//! Placard holders try the handicapped category first. A large car that
//! finds no handicapped slot falls back to the ordinary large-car rule. A
//! small car with a placard instead takes whichever of the closest free
//! small and closest free large slot is nearer by (level, row), small on a
//! tie. Without a placard, a small car tries small then large and a large
//! car tries large only.

use garage_core::{AllocError, Category, SlotId, SpaceAddress};
use garage_layout::CoordinateMap;

use crate::occupancy::OccupancyTable;

/// An arriving car.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ParkRequest {
    /// The car displays a handicapped placard.
    pub wants_handicapped: bool,
    /// The car needs a large space.
    pub is_large_car: bool,
}

impl ParkRequest {
    /// A request with the given placard and size flags.
    pub const fn new(wants_handicapped: bool, is_large_car: bool) -> Self {
        Self {
            wants_handicapped,
            is_large_car,
        }
    }

    /// Size category of the car.
    pub const fn car(self) -> Category {
        Category::for_car(self.is_large_car)
    }

    /// Category recorded for billing: `Handicapped` for placard holders,
    /// otherwise the car's size.
    pub const fn occupant(self) -> Category {
        if self.wants_handicapped {
            Category::Handicapped
        } else {
            self.car()
        }
    }

    fn no_space(self) -> AllocError {
        AllocError::NoSpaceAvailable {
            wants_handicapped: self.wants_handicapped,
            car: self.car(),
        }
    }
}

/// Choose the slot `request` should get, without claiming it.
///
/// # Errors
///
/// [`AllocError::NoSpaceAvailable`] if no eligible slot is free.
pub fn select_slot(
    table: &OccupancyTable,
    map: &CoordinateMap,
    request: ParkRequest,
) -> Result<SlotId, AllocError> {
    if request.wants_handicapped {
        if let Some(slot) = first_free(table, Category::Handicapped) {
            return Ok(slot);
        }
        if !request.is_large_car {
            return closest_small_or_large(table, map, request);
        }
    }

    let order: &[Category] = if request.is_large_car {
        &[Category::Large]
    } else {
        &[Category::Small, Category::Large]
    };
    order
        .iter()
        .find_map(|&category| first_free(table, category))
        .ok_or_else(|| request.no_space())
}

fn first_free(table: &OccupancyTable, category: Category) -> Option<SlotId> {
    table
        .first_free(category)
        .map(|index| SlotId::new(category, index))
}

fn closest_small_or_large(
    table: &OccupancyTable,
    map: &CoordinateMap,
    request: ParkRequest,
) -> Result<SlotId, AllocError> {
    let small = first_free(table, Category::Small);
    let large = first_free(table, Category::Large);
    match (small, large) {
        (Some(small), Some(large)) => {
            let a = map.to_address(small)?;
            let b = map.to_address(large)?;
            if level_row(a) <= level_row(b) {
                Ok(small)
            } else {
                Ok(large)
            }
        }
        (Some(slot), None) | (None, Some(slot)) => Ok(slot),
        (None, None) => Err(request.no_space()),
    }
}

fn level_row(address: SpaceAddress) -> (u32, u32) {
    (address.level, address.row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use garage_core::Timestamp;
    use garage_layout::{LayoutConfig, LevelSpec};

    use crate::occupancy::Occupancy;

    const PLACARD_SMALL: ParkRequest = ParkRequest::new(true, false);
    const PLACARD_LARGE: ParkRequest = ParkRequest::new(true, true);
    const SMALL: ParkRequest = ParkRequest::new(false, false);
    const LARGE: ParkRequest = ParkRequest::new(false, true);

    fn setup(levels: Vec<LevelSpec>) -> (CoordinateMap, OccupancyTable) {
        let map = CoordinateMap::new(&LayoutConfig {
            levels,
            slots_per_row: 2,
        })
        .unwrap();
        let table = OccupancyTable::for_map(&map);
        (map, table)
    }

    fn fill(table: &mut OccupancyTable, category: Category) {
        for i in 0..table.capacity(category) {
            let entry = Occupancy {
                started_at: Timestamp(1),
                occupant: category,
            };
            table.occupy(SlotId::new(category, i), entry).unwrap();
        }
    }

    #[test]
    fn occupant_follows_placard() {
        assert_eq!(PLACARD_LARGE.occupant(), Category::Handicapped);
        assert_eq!(PLACARD_LARGE.car(), Category::Large);
        assert_eq!(SMALL.occupant(), Category::Small);
        assert_eq!(LARGE.occupant(), Category::Large);
    }

    #[test]
    fn placard_prefers_handicapped() {
        let (map, table) = setup(vec![LevelSpec::new(1, 1, 1)]);
        for req in [PLACARD_SMALL, PLACARD_LARGE] {
            let slot = select_slot(&table, &map, req).unwrap();
            assert_eq!(slot, SlotId::new(Category::Handicapped, 0));
        }
    }

    #[test]
    fn small_car_falls_back_to_large() {
        let (map, mut table) = setup(vec![LevelSpec::new(0, 1, 1)]);
        assert_eq!(
            select_slot(&table, &map, SMALL),
            Ok(SlotId::new(Category::Small, 0))
        );
        fill(&mut table, Category::Small);
        assert_eq!(
            select_slot(&table, &map, SMALL),
            Ok(SlotId::new(Category::Large, 0))
        );
    }

    #[test]
    fn large_car_never_takes_small() {
        let (map, mut table) = setup(vec![LevelSpec::new(0, 1, 1)]);
        fill(&mut table, Category::Large);
        assert_eq!(
            select_slot(&table, &map, LARGE),
            Err(AllocError::NoSpaceAvailable {
                wants_handicapped: false,
                car: Category::Large,
            })
        );
    }

    #[test]
    fn placard_large_car_falls_through_to_large_only() {
        let (map, mut table) = setup(vec![LevelSpec::new(1, 1, 1)]);
        fill(&mut table, Category::Handicapped);
        assert_eq!(
            select_slot(&table, &map, PLACARD_LARGE),
            Ok(SlotId::new(Category::Large, 0))
        );
        fill(&mut table, Category::Large);
        assert!(matches!(
            select_slot(&table, &map, PLACARD_LARGE),
            Err(AllocError::NoSpaceAvailable {
                wants_handicapped: true,
                car: Category::Large,
            })
        ));
    }

    #[test]
    fn placard_small_car_takes_small_on_same_level() {
        // Level 0: handicapped then small. Level 1: small then large.
        let (map, mut table) = setup(vec![LevelSpec::new(1, 1, 0), LevelSpec::new(0, 1, 1)]);
        fill(&mut table, Category::Handicapped);
        table
            .occupy(
                SlotId::new(Category::Small, 0),
                Occupancy {
                    started_at: Timestamp(1),
                    occupant: Category::Small,
                },
            )
            .unwrap();
        table
            .occupy(
                SlotId::new(Category::Small, 1),
                Occupancy {
                    started_at: Timestamp(1),
                    occupant: Category::Small,
                },
            )
            .unwrap();
        // Closest small is level 1 row 0; closest large is level 1 row 1.
        assert_eq!(
            select_slot(&table, &map, PLACARD_SMALL),
            Ok(SlotId::new(Category::Small, 2))
        );
    }

    #[test]
    fn placard_small_car_prefers_large_on_lower_level() {
        let (map, mut table) = setup(vec![
            LevelSpec::new(1, 1, 0),
            LevelSpec::new(0, 0, 1),
            LevelSpec::new(0, 1, 0),
        ]);
        fill(&mut table, Category::Handicapped);
        for i in 0..2 {
            table
                .occupy(
                    SlotId::new(Category::Small, i),
                    Occupancy {
                        started_at: Timestamp(1),
                        occupant: Category::Small,
                    },
                )
                .unwrap();
        }
        assert_eq!(
            select_slot(&table, &map, PLACARD_SMALL),
            Ok(SlotId::new(Category::Large, 0))
        );
    }

    #[test]
    fn placard_small_car_uses_whichever_exists() {
        let (map, mut table) = setup(vec![LevelSpec::new(1, 1, 1)]);
        fill(&mut table, Category::Handicapped);
        fill(&mut table, Category::Small);
        assert_eq!(
            select_slot(&table, &map, PLACARD_SMALL),
            Ok(SlotId::new(Category::Large, 0))
        );
        fill(&mut table, Category::Large);
        assert_eq!(
            select_slot(&table, &map, PLACARD_SMALL),
            Err(AllocError::NoSpaceAvailable {
                wants_handicapped: true,
                car: Category::Small,
            })
        );
    }

    #[test]
    fn selection_does_not_mutate() {
        let (map, table) = setup(vec![LevelSpec::new(1, 1, 1)]);
        let before = table.free_count(Category::Handicapped);
        let _ = select_slot(&table, &map, PLACARD_SMALL);
        assert_eq!(table.free_count(Category::Handicapped), before);
    }
}
