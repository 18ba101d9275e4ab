use crate::actor_framework::Entity;
use crate::domain::Product;

impl Entity for Product {
    type Id = u64;

    fn id(&self) -> &u64 {
        &self.id
    }

    fn assign_id(&mut self, id: u64) {
        self.id = id;
    }

    /// Only the title is checked; every other field is stored as given.
    fn validate(&self) -> Result<(), String> {
        if self.title.is_empty() {
            return Err("Product title cannot be empty".to_string());
        }
        Ok(())
    }
}
