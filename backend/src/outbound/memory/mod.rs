//! In-memory kitchen store.
//!
//! Implements every repository port over plain collections guarded by a
//! single mutex, so each port call is atomic. Names sort by code point, as
//! the `COLLATE "C"` name columns do in PostgreSQL; filtering, cascade and
//! join-row semantics match the PostgreSQL adapters too. Used by tests and
//! by database-less development runs.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

use pagination::PageWindow;

use crate::domain::ports::KitchenRepositoryError;
use crate::domain::{
    Cook, CookId, DishDescription, DishDetail, DishDraft, DishId, DishName, DishSummary,
    DishType, DishTypeId, Ingredient, IngredientId, Price, SearchFilter,
};

mod cooks;
mod dish_types;
mod dishes;
mod ingredients;


#[derive(Debug, Clone)]
struct StoredCook {
    cook: Cook,
    password_hash: String,
}

#[derive(Debug, Clone)]
struct StoredDish {
    name: DishName,
    description: DishDescription,
    price: Price,
    dish_type: DishTypeId,
}

#[derive(Debug, Default)]
struct Tables {
    last_id: i64,
    cooks: BTreeMap<CookId, StoredCook>,
    dish_types: BTreeMap<DishTypeId, DishType>,
    ingredients: BTreeMap<IngredientId, Ingredient>,
    dishes: BTreeMap<DishId, StoredDish>,
    dish_cooks: BTreeSet<(DishId, CookId)>,
    dish_ingredients: BTreeSet<(DishId, IngredientId)>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id = self.last_id.saturating_add(1);
        self.last_id
    }

    fn dish_summary(
        &self,
        id: DishId,
        dish: &StoredDish,
    ) -> Result<DishSummary, KitchenRepositoryError> {
        let dish_type = self.dish_types.get(&dish.dish_type).cloned().ok_or_else(|| {
            KitchenRepositoryError::query(format!(
                "dish {id} references missing dish type {}",
                dish.dish_type
            ))
        })?;
        Ok(DishSummary {
            id,
            name: dish.name.clone(),
            price: dish.price,
            dish_type,
        })
    }

    fn dish_detail(&self, id: DishId) -> Result<Option<DishDetail>, KitchenRepositoryError> {
        let Some(dish) = self.dishes.get(&id) else {
            return Ok(None);
        };
        let summary = self.dish_summary(id, dish)?;
        let mut cooks: Vec<Cook> = self
            .dish_cooks
            .range((id, CookId::new(i64::MIN))..=(id, CookId::new(i64::MAX)))
            .filter_map(|(_, cook_id)| self.cooks.get(cook_id).map(|stored| stored.cook.clone()))
            .collect();
        cooks.sort_by(|a, b| (&a.username, a.id).cmp(&(&b.username, b.id)));
        let mut ingredients: Vec<Ingredient> = self
            .dish_ingredients
            .range((id, IngredientId::new(i64::MIN))..=(id, IngredientId::new(i64::MAX)))
            .filter_map(|(_, ingredient_id)| self.ingredients.get(ingredient_id).cloned())
            .collect();
        sort_by_name(&mut ingredients, |ingredient| {
            (ingredient.name.as_ref(), ingredient.id.get())
        });
        Ok(Some(DishDetail {
            summary,
            description: dish.description.clone(),
            cooks,
            ingredients,
        }))
    }

    fn check_draft_references(&self, draft: &DishDraft) -> Result<(), KitchenRepositoryError> {
        if !self.dish_types.contains_key(&draft.dish_type) {
            return Err(KitchenRepositoryError::query(format!(
                "foreign key violation: dish type {} does not exist",
                draft.dish_type
            )));
        }
        if let Some(cook) = draft.cooks.iter().find(|id| !self.cooks.contains_key(id)) {
            return Err(KitchenRepositoryError::query(format!(
                "foreign key violation: cook {cook} does not exist"
            )));
        }
        if let Some(ingredient) = draft
            .ingredients
            .iter()
            .find(|id| !self.ingredients.contains_key(id))
        {
            return Err(KitchenRepositoryError::query(format!(
                "foreign key violation: ingredient {ingredient} does not exist"
            )));
        }
        Ok(())
    }

    fn write_dish(&mut self, id: DishId, draft: &DishDraft) {
        self.dishes.insert(
            id,
            StoredDish {
                name: draft.name.clone(),
                description: draft.description.clone(),
                price: draft.price,
                dish_type: draft.dish_type,
            },
        );
        self.unlink_dish(id);
        self.dish_cooks.extend(draft.cooks.iter().map(|cook| (id, *cook)));
        self.dish_ingredients
            .extend(draft.ingredients.iter().map(|ingredient| (id, *ingredient)));
    }

    fn unlink_dish(&mut self, id: DishId) {
        self.dish_cooks.retain(|(dish, _)| *dish != id);
        self.dish_ingredients.retain(|(dish, _)| *dish != id);
    }

    fn remove_dish(&mut self, id: DishId) -> bool {
        self.unlink_dish(id);
        self.dishes.remove(&id).is_some()
    }
}

/// Sort records by a `(name, id)` key, the natural order of every listing.
fn sort_by_name<T, F>(records: &mut [T], key: F)
where
    F: Fn(&T) -> (&str, i64),
{
    records.sort_by(|a, b| key(a).cmp(&key(b)));
}

/// Slice an ordered, filtered sequence down to one page window.
fn window<T>(records: impl IntoIterator<Item = T>, window: PageWindow) -> Vec<T> {
    let offset = usize::try_from(window.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(window.limit()).unwrap_or(usize::MAX);
    records.into_iter().skip(offset).take(limit).collect()
}

fn count(matching: usize) -> u64 {
    u64::try_from(matching).unwrap_or(u64::MAX)
}

fn matches(filter: &SearchFilter, name: &impl AsRef<str>) -> bool {
    filter.matches(name.as_ref())
}

/// Kitchen repositories backed by process memory.
///
/// # Examples
/// ```
/// use kitchen::domain::ports::DishTypeRepository;
/// use kitchen::domain::{DishTypeName, SearchFilter};
/// use kitchen::outbound::memory::InMemoryKitchenStore;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let store = InMemoryKitchenStore::new();
/// let name = DishTypeName::new("Soup").unwrap();
/// store.insert_dish_type(&name).await.unwrap();
/// assert_eq!(store.count_dish_types(&SearchFilter::none()).await.unwrap(), 1);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryKitchenStore {
    tables: Mutex<Tables>,
}

impl InMemoryKitchenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, KitchenRepositoryError> {
        self.tables
            .lock()
            .map_err(|_| KitchenRepositoryError::query("in-memory store lock poisoned"))
    }
}
