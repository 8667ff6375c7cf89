//! Diesel repositories against embedded PostgreSQL.
//!
//! The in-memory store has its own suite; these cases pin the behaviour that
//! lives in SQL: `ILIKE` search, name ordering, foreign-key cascades and
//! unique-username mapping.

#[path = "support/pg_embed.rs"]
mod pg_embed;

use chrono::{TimeZone, Utc};
use pagination::{PageNumber, PageSize, PageWindow, Paginator};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use rust_decimal::Decimal;
use tokio::runtime::Runtime;

use kitchen::domain::ports::{
    CookRepository, DishRepository, DishTypeRepository, IngredientRepository,
    KitchenRepositoryError,
};
use kitchen::domain::{
    CookId, DishDescription, DishDraft, DishFields, DishId, DishName, DishType, DishTypeName,
    IngredientId, IngredientName, NewCook, PersonName, Price, SearchFilter, Username,
    YearsOfExperience,
};
use kitchen::outbound::persistence::{
    DbPool, DieselCookRepository, DieselDishRepository, DieselDishTypeRepository,
    DieselIngredientRepository, PoolConfig,
};
use pg_embed::{handle_cluster_setup_failure, migrated_database};

struct Store {
    runtime: Runtime,
    cooks: DieselCookRepository,
    dish_types: DieselDishTypeRepository,
    ingredients: DieselIngredientRepository,
    dishes: DieselDishRepository,
    _database: TemporaryDatabase,
}

fn open_store() -> Result<Store, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let database = migrated_database(&runtime)?;
    let pool = runtime
        .block_on(DbPool::new(PoolConfig::new(database.url()).with_max_size(2)))
        .map_err(|err| err.to_string())?;
    Ok(Store {
        runtime,
        cooks: DieselCookRepository::new(pool.clone()),
        dish_types: DieselDishTypeRepository::new(pool.clone()),
        ingredients: DieselIngredientRepository::new(pool.clone()),
        dishes: DieselDishRepository::new(pool),
        _database: database,
    })
}

#[fixture]
fn store() -> Option<Store> {
    match open_store() {
        Ok(store) => Some(store),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn first_page(total: u64) -> PageWindow {
    Paginator::new(PageSize::clamped(10))
        .plan(total, PageNumber::new(1).expect("positive page"))
        .window()
}

fn new_cook(username: &str) -> NewCook {
    NewCook {
        username: Username::new(username).expect("valid username"),
        first_name: PersonName::new("Ann").expect("valid name"),
        last_name: PersonName::new("Smith").expect("valid name"),
        years_of_experience: YearsOfExperience::new(5).expect("valid years"),
        password_hash: format!("hash-of-{username}"),
        date_joined: Utc
            .with_ymd_and_hms(2025, 3, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

fn draft(
    name: &str,
    dish_type: &DishType,
    cooks: Vec<CookId>,
    ingredients: Vec<IngredientId>,
) -> DishDraft {
    DishDraft::new(
        DishFields {
            name: DishName::new(name).expect("valid name"),
            description: DishDescription::new("House recipe").expect("valid description"),
            price: Price::new(Decimal::new(1250, 2)).expect("valid price"),
            dish_type: dish_type.id,
        },
        cooks,
        ingredients,
    )
}

impl Store {
    async fn dish_type(&self, name: &str) -> DishType {
        self.dish_types
            .insert_dish_type(&DishTypeName::new(name).expect("valid name"))
            .await
            .expect("insert dish type")
    }

    async fn ingredient(&self, name: &str) -> IngredientId {
        self.ingredients
            .insert_ingredient(&IngredientName::new(name).expect("valid name"))
            .await
            .expect("insert ingredient")
            .id
    }

    async fn cook(&self, username: &str) -> CookId {
        self.cooks
            .insert_cook(&new_cook(username))
            .await
            .expect("insert cook")
            .id
    }

    async fn links(&self, dish: DishId) -> (Vec<CookId>, Vec<IngredientId>) {
        let detail = self
            .dishes
            .find_dish(dish)
            .await
            .expect("find dish")
            .expect("dish exists");
        let mut cooks: Vec<_> = detail.cooks.iter().map(|cook| cook.id).collect();
        let mut ingredients: Vec<_> = detail.ingredients.iter().map(|item| item.id).collect();
        cooks.sort_unstable();
        ingredients.sort_unstable();
        (cooks, ingredients)
    }
}

#[rstest]
#[case("cook", vec!["Cook21", "Cook_1", "cook_2"])]
#[case("K_", vec!["Cook_1", "cook_2"])]
#[case("_1", vec!["Cook_1"])]
#[case("chef", vec![])]
fn username_search_is_case_insensitive_and_literal(
    store: Option<Store>,
    #[case] text: &str,
    #[case] expected: Vec<&str>,
) {
    let Some(store) = store else { return };
    store.runtime.block_on(async {
        for username in ["cook_2", "Cook21", "Cook_1"] {
            store.cook(username).await;
        }
        let filter = SearchFilter::new(Some(text));

        let total = store.cooks.count_cooks(&filter).await.expect("count");
        let listed = store
            .cooks
            .list_cooks(&filter, first_page(total))
            .await
            .expect("list");

        let usernames: Vec<&str> = listed.iter().map(|cook| cook.username.as_ref()).collect();
        assert_eq!(usernames, expected);
        assert_eq!(total, u64::try_from(expected.len()).expect("small count"));
    });
}

#[rstest]
fn names_sort_by_code_point_then_id(store: Option<Store>) {
    let Some(store) = store else { return };
    store.runtime.block_on(async {
        let mut inserted = Vec::new();
        for name in ["apple", "Banana", "apple", "Éclair"] {
            inserted.push(store.dish_type(name).await.id);
        }

        let listed = store.dish_types.all_dish_types().await.expect("list");

        let order: Vec<_> = listed
            .iter()
            .map(|dish_type| (dish_type.name.as_ref().to_owned(), dish_type.id))
            .collect();
        assert_eq!(
            order,
            vec![
                ("Banana".to_owned(), inserted[1]),
                ("apple".to_owned(), inserted[0]),
                ("apple".to_owned(), inserted[2]),
                ("Éclair".to_owned(), inserted[3]),
            ]
        );
    });
}

#[rstest]
fn deleting_a_dish_type_removes_its_dishes(store: Option<Store>) {
    let Some(store) = store else { return };
    store.runtime.block_on(async {
        let soup = store.dish_type("Soup").await;
        let dessert = store.dish_type("Dessert").await;
        let ann = store.cook("chef.ann").await;
        let beet = store.ingredient("Beetroot").await;
        let borscht = store
            .dishes
            .insert_dish(&draft("Borscht", &soup, vec![ann], vec![beet]))
            .await
            .expect("insert dish");
        store
            .dishes
            .insert_dish(&draft("Pavlova", &dessert, vec![ann], vec![]))
            .await
            .expect("insert dish");

        assert!(store.dish_types.delete_dish_type(soup.id).await.expect("delete"));

        assert!(store.dishes.find_dish(borscht).await.expect("find").is_none());
        let remaining = store
            .dishes
            .count_dishes(&SearchFilter::none())
            .await
            .expect("count");
        assert_eq!(remaining, 1);
        let credited = store.cooks.cook_dishes(ann).await.expect("cook dishes");
        let names: Vec<&str> = credited.iter().map(|dish| dish.name.as_ref()).collect();
        assert_eq!(names, vec!["Pavlova"]);
        assert!(!store.dish_types.delete_dish_type(soup.id).await.expect("delete"));
    });
}

#[rstest]
fn updating_a_dish_replaces_its_links(store: Option<Store>) {
    let Some(store) = store else { return };
    store.runtime.block_on(async {
        let soup = store.dish_type("Soup").await;
        let ann = store.cook("chef.ann").await;
        let bob = store.cook("chef.bob").await;
        let beet = store.ingredient("Beetroot").await;
        let dill = store.ingredient("Dill").await;
        let dish = store
            .dishes
            .insert_dish(&draft("Borscht", &soup, vec![ann], vec![beet]))
            .await
            .expect("insert dish");

        let updated = store
            .dishes
            .update_dish(dish, &draft("Borscht", &soup, vec![bob], vec![dill, beet]))
            .await
            .expect("update dish");

        assert!(updated);
        let mut ingredients = vec![beet, dill];
        ingredients.sort_unstable();
        assert_eq!(store.links(dish).await, (vec![bob], ingredients));
        let unknown = store
            .dishes
            .update_dish(DishId::new(dish.get() + 1000), &draft("Ghost", &soup, vec![], vec![]))
            .await
            .expect("update unknown dish");
        assert!(!unknown);
    });
}

#[rstest]
fn deleting_a_cook_only_drops_their_credits(store: Option<Store>) {
    let Some(store) = store else { return };
    store.runtime.block_on(async {
        let soup = store.dish_type("Soup").await;
        let ann = store.cook("chef.ann").await;
        let bob = store.cook("chef.bob").await;
        let dish = store
            .dishes
            .insert_dish(&draft("Borscht", &soup, vec![ann, bob], vec![]))
            .await
            .expect("insert dish");

        assert!(store.cooks.delete_cook(ann).await.expect("delete cook"));

        assert_eq!(store.links(dish).await, (vec![bob], vec![]));
        assert!(store.cooks.find_cook(ann).await.expect("find").is_none());
        assert!(!store.cooks.delete_cook(ann).await.expect("delete again"));
    });
}

#[rstest]
fn duplicate_usernames_are_reported(store: Option<Store>) {
    let Some(store) = store else { return };
    store.runtime.block_on(async {
        store.cook("chef.ann").await;

        let err = store
            .cooks
            .insert_cook(&new_cook("chef.ann"))
            .await
            .expect_err("duplicate username");

        assert_eq!(err, KitchenRepositoryError::duplicate_username("chef.ann"));
        let other_case = store.cooks.insert_cook(&new_cook("Chef.Ann")).await;
        assert!(other_case.is_ok(), "usernames are case-sensitive");
    });
}

#[rstest]
fn credentials_match_the_exact_username(store: Option<Store>) {
    let Some(store) = store else { return };
    store.runtime.block_on(async {
        let ann = store.cook("chef.ann").await;

        let found = store
            .cooks
            .find_credentials("chef.ann")
            .await
            .expect("lookup")
            .expect("credentials present");
        assert_eq!(found.id, ann);
        assert_eq!(found.password_hash, "hash-of-chef.ann");
        assert!(store.cooks.find_credentials("CHEF.ANN").await.expect("lookup").is_none());
    });
}
