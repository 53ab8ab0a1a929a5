mod slot;

pub use slot::SlotMutator;
