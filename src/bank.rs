use serde::{Serialize, Deserialize};
use crate::physics::RadiationError;




/**
 * Default number of packet slots, which bounds the memory held by the bank
 */
pub static DEFAULT_CAPACITY: usize = 10_000_000;




/**
 * Transport state of a single photon packet
 */
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Packet {

    /// Index of the cell the packet is in
    pub cell: usize,

    /// Optical depth the packet has left to travel
    pub optical_depth: f64,

    /// Distance travelled from the lower wall of the current cell (m)
    pub distance: f64,
}




/**
 * One slot of the bank. The current packet is read while reactivating at the
 * start of a time step; the future packet is written while propagating, and
 * becomes the current packet when the bank is compacted.
 */
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct PacketSlot {
    pub current: Packet,
    pub future: Packet,
}




/**
 * Fixed-capacity store of the packets that are still in flight at the end of
 * a time step. Appending past the capacity drops the packet but still counts
 * it, so that the caller can detect the overflow once the step is done.
 */
#[derive(Clone, Serialize, Deserialize)]
pub struct PacketBank {
    slots: Vec<PacketSlot>,
    live: usize,
    stored: usize,
    capacity: usize,
}




// ============================================================================
impl Packet {
    pub fn new(cell: usize, optical_depth: f64, distance: f64) -> Self {
        Self { cell, optical_depth, distance }
    }

    /**
     * Whether this is an empty slot left by a terminated packet: it has
     * neither distance nor optical depth.
     */
    pub fn is_terminated(&self) -> bool {
        self.distance == 0.0 && self.optical_depth == 0.0
    }
}




// ============================================================================
impl PacketBank {

    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
            stored: 0,
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /**
     * Number of packets carried over from the previous time step.
     */
    pub fn live_count(&self) -> usize {
        self.live
    }

    /**
     * Number of packets appended during this time step, including those that
     * were dropped for lack of space.
     */
    pub fn stored_count(&self) -> usize {
        self.stored
    }

    /**
     * Number of packets appended during this time step that did not fit.
     */
    pub fn dropped_count(&self) -> usize {
        self.stored.saturating_sub(self.capacity)
    }

    pub fn is_overflowing(&self) -> bool {
        self.stored > self.capacity
    }

    /**
     * Return an error if more packets were appended than the bank can hold.
     */
    pub fn check_capacity(&self) -> Result<(), RadiationError> {
        if self.is_overflowing() {
            Err(RadiationError::BankOverflow { stored: self.stored, capacity: self.capacity })
        } else {
            Ok(())
        }
    }

    /**
     * The packet carried over from the previous time step at the given index.
     * Panics if the index is not below `live_count`.
     */
    pub fn current(&self, index: usize) -> Packet {
        self.slots[..self.live][index].current
    }

    /**
     * Store a packet for the next time step. Returns false if the bank is full,
     * in which case the packet is dropped and only counted.
     */
    pub fn append(&mut self, packet: Packet) -> bool {
        let written = if self.stored < self.capacity {
            if self.stored == self.slots.len() {
                self.slots.push(PacketSlot::default());
            }
            self.slots[self.stored].future = packet;
            true
        } else {
            false
        };
        self.stored += 1;
        written
    }

    /**
     * Promote the packets stored during this time step to be the current
     * packets for the next one, and clear the future slots. Returns the new
     * live count.
     */
    pub fn compact(&mut self) -> usize {
        let live = self.stored.min(self.capacity);

        for slot in &mut self.slots[..live] {
            slot.current = slot.future;
            slot.future = Packet::default();
        }
        self.slots.truncate(live);
        self.live = live;
        self.stored = 0;
        live
    }
}

impl Default for PacketBank {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
