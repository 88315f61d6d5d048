use crate::core::plant::{ConsumptionRecord, Plant, PlantId};

/// Read-only source of the known plants.
pub trait PlantRegistry: Sync {
    /// List the plants.
    ///
    /// The order must stay the same between calls: the optimizer breaks ties by it.
    fn list_plants(&self) -> Vec<Plant>;
}

/// Read-only source of the plant consumption history.
pub trait ConsumptionReader: Sync {
    /// Get all the known records of the plant, in no particular order.
    fn get_consumption_records(&self, plant_id: PlantId) -> Vec<ConsumptionRecord>;
}
