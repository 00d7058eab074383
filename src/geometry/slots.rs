use serde::Serialize;

const FIRST_SLOT_DEG: f64 = 120.0;
const SLOT_WIDTH_DEG: f64 = 30.0;
const SLOT_GAP_DEG: f64 = 7.5;

/// One of the three badge positions below the dial.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DataSlot {
    First,
    Second,
    Third,
}

impl DataSlot {
    pub const ALL: [DataSlot; 3] = [DataSlot::First, DataSlot::Second, DataSlot::Third];

    /// Slot for a 1-based index.
    pub fn from_index(index: usize) -> Option<DataSlot> {
        DataSlot::ALL.get(index.checked_sub(1)?).copied()
    }

    pub fn index(self) -> usize {
        match self {
            DataSlot::First => 1,
            DataSlot::Second => 2,
            DataSlot::Third => 3,
        }
    }

    /// Label orientation keeping badge text upright along the arc.
    fn rotation_deg(self) -> f64 {
        match self {
            DataSlot::First => -34.0,
            DataSlot::Second => 2.0,
            DataSlot::Third => 39.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SlotGeometry {
    pub start_deg: f64,
    pub end_deg: f64,
    pub rotation_deg: f64,
}

pub fn compute_data_slot(slot: DataSlot) -> SlotGeometry {
    let start_deg =
        FIRST_SLOT_DEG + (slot.index() - 1) as f64 * (SLOT_WIDTH_DEG + SLOT_GAP_DEG) + SLOT_GAP_DEG;
    SlotGeometry {
        start_deg,
        end_deg: start_deg + SLOT_WIDTH_DEG,
        rotation_deg: slot.rotation_deg(),
    }
}

/// Hands out slots in order to the badges that are shown. Badges beyond the
/// third get no slot.
pub fn assign_slots<T>(badges: impl IntoIterator<Item = T>) -> Vec<(DataSlot, T)> {
    DataSlot::ALL.into_iter().zip(badges).collect()
}
