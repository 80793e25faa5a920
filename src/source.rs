use rand::Rng;
use rand::distributions::Open01;
use serde::{Serialize, Deserialize};
use crate::bank::{Packet, PacketBank};
use crate::cell::Cell;
use crate::transport::{self, TransportStats};




/**
 * Central point source of ionising photons. Each time step it emits a fixed
 * number of packets into the innermost cell, every one of them carrying an
 * equal share of the ionising photon rate.
 */
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmissionSource {

    /// Ionising photon rate of the source (1 / s)
    pub ionising_rate: f64,

    /// Number of packets emitted per time step
    pub photons_per_step: usize,
}




// ============================================================================
impl EmissionSource {

    /**
     * Draw the optical depth a packet travels before it is absorbed, from the
     * exponential distribution with unit mean. The result is strictly
     * positive.
     */
    pub fn sample_optical_depth<R: Rng>(rng: &mut R) -> f64 {
        let u: f64 = rng.sample(Open01);
        -u.ln()
    }

    /**
     * Emit this step's packets and propagate each of them through the grid,
     * with `light_crossing` meters of travel available to each one. Packets
     * that do not fit in the bank are dropped and counted there.
     */
    pub fn emit<R: Rng>(
        &self,
        cells: &mut [Cell],
        light_crossing: f64,
        bank: &mut PacketBank,
        rng: &mut R,
        stats: &mut TransportStats)
    {
        for _ in 0..self.photons_per_step {
            let mut packet = Packet::new(0, Self::sample_optical_depth(rng), 0.0);
            let mut budget = light_crossing;
            stats.emitted += 1;
            stats.record(transport::propagate(cells, &mut packet, &mut budget, bank));
        }
    }
}
