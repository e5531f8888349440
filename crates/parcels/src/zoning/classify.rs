use crate::grid::{BlockCells, ZoneValue};
use crate::lot::{LotSize, ParcelFlags, ParcelRecord};

/// Result of scanning a lot's window of block cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoningOutcome {
    pub zone: ZoneValue,
    pub uniform: bool,
}

/// Classify the lot's own `width × depth` window of the block grid.
///
/// The running zone starts at `unzoned` and adopts the first cell that moves
/// it off that value; any later cell that disagrees clears `uniform`. Every
/// in-window cell is visited, row-major. Cells tagged [`ZoneValue::NONE`] are
/// read as `unzoned`.
pub fn classify(cells: &BlockCells, lot: LotSize, unzoned: ZoneValue) -> ZoningOutcome {
    let width = (lot.width as usize).min(cells.width);
    let depth = (lot.depth as usize).min(cells.depth);

    let mut zone = unzoned;
    let mut uniform = true;

    for y in 0..depth {
        for x in 0..width {
            let mut cell_zone = cells.get(x, y);
            if cell_zone.is_none() {
                cell_zone = unzoned;
            }

            if zone == unzoned {
                zone = cell_zone;
            } else if cell_zone != zone {
                uniform = false;
            }
        }
    }

    ZoningOutcome { zone, uniform }
}

/// Store the outcome on the lot record: the zone becomes the pre-zone and the
/// uniformity bit is set or cleared.
pub fn apply_zoning(record: &mut ParcelRecord, outcome: ZoningOutcome) {
    record.zone = outcome.zone;
    record
        .flags
        .set(ParcelFlags::UNIFORM_ZONING, outcome.uniform);
}
