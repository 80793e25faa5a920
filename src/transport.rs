use serde::{Serialize, Deserialize};
use crate::bank::{Packet, PacketBank};
use crate::cell::Cell;




/**
 * Result of advancing a packet through (part of) one cell
 */
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// The packet reached the outer wall with optical depth and distance left
    Crossed,

    /// The packet used up its optical depth inside the cell
    Absorbed,

    /// The packet ran out of light-crossing distance inside the cell and was
    /// stored for the next time step
    Banked,
}




/**
 * Final outcome of a packet within one time step
 */
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fate {
    Absorbed,
    Escaped,
    Banked,
}




/**
 * Packet counts for one time step. Packets are conserved: the absorbed,
 * escaped, and banked counts add up to the reactivated and emitted counts.
 */
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransportStats {
    pub reactivated: usize,
    pub emitted: usize,
    pub skipped: usize,
    pub absorbed: usize,
    pub escaped: usize,
    pub banked: usize,
}




// ============================================================================
impl TransportStats {
    pub fn record(&mut self, fate: Fate) {
        match fate {
            Fate::Absorbed => self.absorbed += 1,
            Fate::Escaped  => self.escaped += 1,
            Fate::Banked   => self.banked += 1,
        }
    }

    pub fn is_conserved(&self) -> bool {
        self.absorbed + self.escaped + self.banked == self.reactivated + self.emitted
    }
}




/**
 * Advance a packet through the rest of its current cell, starting from its
 * in-cell distance, using at most `budget` meters of light travel. The path
 * length covered is added to the cell's tally. A packet that runs out of
 * budget is appended to the bank, and the budget is set to zero.
 *
 * The packet must be inside the grid and have positive optical depth.
 */
pub fn step(cells: &mut [Cell], packet: &mut Packet, budget: &mut f64, bank: &mut PacketBank) -> Step {
    let cell = &mut cells[packet.cell];
    let remaining = cell.length - packet.distance;
    let opacity = cell.opacity();
    let cell_optical_depth = opacity * remaining;

    if packet.optical_depth > cell_optical_depth && *budget > remaining {
        cell.path_length += remaining;
        packet.optical_depth -= cell_optical_depth;
        packet.cell += 1;
        packet.distance = 0.0;
        *budget -= remaining;
        return Step::Crossed
    }

    let absorption_length = packet.optical_depth / opacity;

    if absorption_length <= *budget {
        cell.path_length += absorption_length;
        packet.optical_depth = 0.0;
        Step::Absorbed
    } else {
        cell.path_length += *budget;
        packet.optical_depth -= opacity * *budget;
        packet.distance += *budget;
        bank.append(*packet);
        *budget = 0.0;
        Step::Banked
    }
}




/**
 * Propagate a packet from its current position until it is absorbed, banked,
 * or leaves the outer edge of the grid.
 */
pub fn propagate(cells: &mut [Cell], packet: &mut Packet, budget: &mut f64, bank: &mut PacketBank) -> Fate {
    loop {
        if packet.cell >= cells.len() {
            return Fate::Escaped
        }
        match step(cells, packet, budget, bank) {
            Step::Crossed  => continue,
            Step::Absorbed => return Fate::Absorbed,
            Step::Banked   => return Fate::Banked,
        }
    }
}




/**
 * Resume a packet carried over from the previous time step. Its first step
 * only crosses what is left of the cell it was stored in; once it reaches a
 * cell wall it continues like a freshly emitted packet.
 */
pub fn resume(cells: &mut [Cell], packet: &mut Packet, budget: &mut f64, bank: &mut PacketBank) -> Fate {
    if packet.cell >= cells.len() {
        return Fate::Escaped
    }
    match step(cells, packet, budget, bank) {
        Step::Crossed  => propagate(cells, packet, budget, bank),
        Step::Absorbed => Fate::Absorbed,
        Step::Banked   => Fate::Banked,
    }
}




// ============================================================================
#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use crate::bank::{Packet, PacketBank};
    use crate::cell::Cell;
    use crate::physics::HYDROGEN_MASS;
    use super::*;

    /**
     * A row of cells of length 10 with opacity `opacity` per meter.
     */
    fn grid(num_cells: usize, opacity: f64) -> Vec<Cell> {
        (0..num_cells)
            .map(|i| {
                let mut cell = Cell::new(10.0 * i as f64, 10.0 * (i + 1) as f64).with_density(HYDROGEN_MASS);
                cell.cross_section = opacity;
                cell
            })
            .collect()
    }

    #[test]
    fn packet_crosses_cell_with_budget_left() {
        let mut cells = grid(2, 0.2);
        let mut bank = PacketBank::new(8);
        let mut packet = Packet::new(0, 5.0, 0.0);
        let mut budget = 20.0;

        assert_eq!(step(&mut cells, &mut packet, &mut budget, &mut bank), Step::Crossed);
        assert_relative_eq!(cells[0].path_length, 10.0);
        assert_relative_eq!(packet.optical_depth, 3.0, max_relative = 1e-12);
        assert_relative_eq!(budget, 10.0);
        assert_eq!(packet.cell, 1);
        assert_eq!(packet.distance, 0.0);
    }

    #[test]
    fn packet_is_absorbed_after_partial_path() {
        let mut cells = grid(1, 0.2);
        let mut bank = PacketBank::new(8);
        let mut packet = Packet::new(0, 1.0, 0.0);
        let mut budget = 20.0;

        assert_eq!(propagate(&mut cells, &mut packet, &mut budget, &mut bank), Fate::Absorbed);
        assert_relative_eq!(cells[0].path_length, 5.0, max_relative = 1e-12);
        assert_eq!(packet.optical_depth, 0.0);
        assert_eq!(bank.stored_count(), 0);
    }

    #[test]
    fn packet_out_of_budget_is_banked_mid_cell() {
        let mut cells = grid(1, 0.2);
        let mut bank = PacketBank::new(8);
        let mut packet = Packet::new(0, 1.5, 0.0);
        let mut budget = 4.0;

        assert_eq!(propagate(&mut cells, &mut packet, &mut budget, &mut bank), Fate::Banked);
        assert_relative_eq!(cells[0].path_length, 4.0);
        assert_relative_eq!(packet.optical_depth, 0.7, max_relative = 1e-12);
        assert_relative_eq!(packet.distance, 4.0);
        assert_eq!(budget, 0.0);
        assert_eq!(bank.stored_count(), 1);

        bank.compact();
        assert_eq!(bank.current(0), packet);
    }

    #[test]
    fn resumed_packet_only_crosses_the_rest_of_its_cell() {
        let mut cells = grid(2, 0.2);
        let mut bank = PacketBank::new(8);
        let mut packet = Packet::new(0, 1.5, 4.0);
        let mut budget = 8.0;

        assert_eq!(resume(&mut cells, &mut packet, &mut budget, &mut bank), Fate::Absorbed);
        assert_relative_eq!(cells[0].path_length, 6.0);
        assert_relative_eq!(cells[1].path_length, 1.5, max_relative = 1e-12);
        assert_eq!(packet.cell, 1);
    }

    #[test]
    fn packet_leaving_the_grid_escapes() {
        let mut cells = grid(3, 0.01);
        let mut bank = PacketBank::new(8);
        let mut packet = Packet::new(0, 5.0, 0.0);
        let mut budget = 100.0;

        assert_eq!(propagate(&mut cells, &mut packet, &mut budget, &mut bank), Fate::Escaped);
        assert!(cells.iter().all(|c| c.path_length == 10.0));
        assert_eq!(packet.cell, 3);
        assert_eq!(bank.stored_count(), 0);
    }

    #[test]
    fn ionized_gas_does_not_absorb() {
        let mut cells = grid(2, 0.2);
        cells[0].set_neutral_fraction(0.0);
        let mut bank = PacketBank::new(8);
        let mut packet = Packet::new(0, 0.5, 0.0);
        let mut budget = 5.0;

        assert_eq!(propagate(&mut cells, &mut packet, &mut budget, &mut bank), Fate::Banked);
        assert_eq!(packet.optical_depth, 0.5);
        assert_relative_eq!(packet.distance, 5.0);
        assert!(cells[0].path_length.is_finite());
    }

    #[test]
    fn stats_balance_packets() {
        let mut stats = TransportStats { emitted: 3, ..Default::default() };
        stats.record(Fate::Absorbed);
        stats.record(Fate::Escaped);
        assert!(!stats.is_conserved());
        stats.record(Fate::Banked);
        assert!(stats.is_conserved());
    }
}
