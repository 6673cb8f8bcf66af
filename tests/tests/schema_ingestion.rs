use airstorm::{schema::TableId, Base, Disconnected, Value};
use tests::*;

async fn disconnected_base() -> Base {
    init_logging();
    builder().build(Disconnected).await.unwrap()
}

#[tokio::test]
async fn every_table_gets_model_and_list_types() {
    let base = disconnected_base().await;
    let schema = schema();

    assert_eq!(base.model_types().len(), schema.tables.len());

    for table in schema.tables() {
        let model_type = assert_ok!(base.model_type_by_id(&table.id));
        assert!(model_type.fields().len() >= 1);
        assert_eq!(model_type.fields().len(), table.columns.len());

        let list_type = assert_ok!(base.model_list_type_by_id(&table.id));
        assert!(list_type.field_lists().len() >= 1);
        assert_eq!(list_type.id(), model_type.id());
    }
}

#[tokio::test]
async fn model_type_id_is_table_id() {
    let base = disconnected_base().await;

    let context = assert_ok!(base.model_type("Context"));
    assert_eq!(context.id().as_str(), "tblCko8U7PjPYPNpf");
    assert_eq!(context.name(), "Context");

    let ids: Vec<&TableId> = base.model_types().map(|model_type| model_type.id()).collect();
    assert_unique!(ids);
}

#[tokio::test]
async fn field_id_is_column_id() {
    let base = disconnected_base().await;

    let context = assert_ok!(base.model_type("tblCko8U7PjPYPNpf"));
    let name = context.field("name").unwrap();
    assert_eq!(name.id().as_str(), "fld5tR1r0jBCqjG06");
    assert_eq!(name.name(), "Name");
    assert_eq!(name.table_id(), context.id());
}

#[tokio::test]
async fn names_are_normalized() {
    let base = disconnected_base().await;

    let smoothie = assert_ok!(base.model_type("Smoothie"));
    assert_eq!(smoothie.table_name(), "Smoothies");
    assert_eq!(smoothie.primary_field(), "Name");

    let attributes: Vec<_> = smoothie.fields().map(|field| field.attribute()).collect();
    assert_eq!(attributes, ["name", "fruits", "main_fruit", "total_calories"]);

    let list_type = assert_ok!(base.model_list_type("SmoothieList"));
    assert_eq!(list_type.name(), "SmoothieList");

    let plurals: Vec<_> = list_type.field_lists().map(|list| list.attribute()).collect();
    assert_eq!(plurals, ["names", "fruits", "main_fruits", "total_calories"]);

    let fruit = assert_ok!(base.model_list_type("Fruit"));
    assert!(fruit.field_list("seasons").is_some());
    assert!(fruit.field_list("season").is_none());
}

#[tokio::test]
async fn lookup_by_type_name_table_name_or_id() {
    let base = disconnected_base().await;

    let by_type = assert_ok!(base.model_type("Fruit"));
    let by_table = assert_ok!(base.model_type("Fruits"));
    let by_id = assert_ok!(base.model_type("tblFruits"));

    assert_eq!(by_type.id(), by_table.id());
    assert_eq!(by_type.id(), by_id.id());

    let err = assert_err_is!(base.model_type("Vegetable"), is_unknown_attribute);
    assert!(err.to_string().contains("Vegetable"), "{err}");
}

#[tokio::test]
async fn base_settings() {
    init_logging();

    let base = builder()
        .api_key("keyTest")
        .build(Disconnected)
        .await
        .unwrap();

    assert_eq!(base.id(), "appGrocery");
    assert_eq!(base.api_key(), Some("keyTest"));
    assert_eq!(base.schema().name, "Grocery");

    let base = builder()
        .base_id("appOther")
        .build(Disconnected)
        .await
        .unwrap();
    assert_eq!(base.id(), "appOther");
    assert_eq!(base.api_key(), None);
}

#[tokio::test]
async fn field_metadata() {
    let base = disconnected_base().await;
    let fruit = assert_ok!(base.model_type("Fruit"));

    let season = fruit.field("season").unwrap();
    assert_eq!(season.doc(), "Season the fruit is harvested in");
    assert_eq!(season.default_value(), Value::from(""));
    assert!(!season.is_read_only());

    let calories = fruit.field("calories").unwrap();
    assert_eq!(calories.doc(), "Calories field.");
    assert_eq!(calories.default_value(), Value::I64(0));

    assert_eq!(fruit.field("price").unwrap().default_value(), Value::F64(0.0));
    assert_eq!(fruit.field("tags").unwrap().default_value(), Value::List(vec![]));
    assert!(fruit.field("label").unwrap().is_read_only());

    let smoothies = fruit.field("smoothies").unwrap();
    assert!(smoothies.is_many());
    let symmetric = smoothies.symmetric_field(&base).unwrap();
    assert_eq!(symmetric.id().as_str(), "fldSmoothieFruits");
    assert_eq!(symmetric.table_id().as_str(), "tblSmoothies");

    let farm = fruit.field("farm").unwrap();
    assert!(!farm.is_many());
    assert!(farm.foreign_key().is_some());

    let smoothie = assert_ok!(base.model_type("Smoothie"));
    assert_none!(smoothie.field("main_fruit").unwrap().symmetric_field(&base));
    assert_none!(smoothie.field("name").unwrap().symmetric_field(&base));
}

#[tokio::test]
async fn renamer_applies_before_normalization() {
    init_logging();

    let base = builder()
        .renamer(|name| match name {
            "Smoothies" => "Blends".to_string(),
            "Main Fruit" => "Star Ingredient".to_string(),
            other => other.to_string(),
        })
        .build(Disconnected)
        .await
        .unwrap();

    let blend = assert_ok!(base.model_type("Blend"));
    assert_eq!(blend.id().as_str(), "tblSmoothies");
    assert!(blend.field("star_ingredient").is_some());
    assert_none!(blend.field("main_fruit"));

    // The display name still resolves
    assert_ok!(base.model_type("Smoothies"));
    assert_ok!(base.model_list_type("BlendList"));
}

#[tokio::test]
async fn type_name_collision_keeps_first_table() {
    init_logging();

    let base = builder()
        .renamer(|name| match name {
            "Farms" => "Fruits".to_string(),
            other => other.to_string(),
        })
        .build(Disconnected)
        .await
        .unwrap();

    let fruit = assert_ok!(base.model_type("Fruit"));
    assert_eq!(fruit.id().as_str(), "tblFruits");

    // The second table stays reachable by id
    let farm = assert_ok!(base.model_type("tblFarms"));
    assert_eq!(farm.name(), "Fruit");
}

#[tokio::test]
async fn attribute_collision_keeps_first_column() {
    init_logging();

    let base = builder()
        .renamer(|name| match name {
            "Price" => "NAME".to_string(),
            other => other.to_string(),
        })
        .build(Disconnected)
        .await
        .unwrap();

    let fruit = assert_ok!(base.model_type("Fruit"));
    assert_eq!(fruit.field("name").unwrap().id(), "fldFruitName");
    assert_none!(fruit.field_by_column_id(&"fldFruitPrice".into()));
    assert_none!(fruit.field("price"));
    assert_eq!(fruit.fields().count(), 7);

    let fruits = assert_ok!(base.model_list_type("FruitList"));
    assert_eq!(fruits.field_list("names").unwrap().field().id(), "fldFruitName");
}

#[tokio::test]
async fn plural_collision_keeps_first_field() {
    init_logging();

    let base = builder()
        .renamer(|name| match name {
            "Season" => "Tag".to_string(),
            other => other.to_string(),
        })
        .build(Disconnected)
        .await
        .unwrap();

    // Both fields exist on the model type
    let fruit = assert_ok!(base.model_type("Fruit"));
    assert_eq!(fruit.field("tag").unwrap().id(), "fldFruitSeason");
    assert_eq!(fruit.field("tags").unwrap().id(), "fldFruitTags");

    // Only the first one gets the list accessor
    let fruits = assert_ok!(base.model_list_type("FruitList"));
    assert_eq!(fruits.field_list("tags").unwrap().field().id(), "fldFruitSeason");
    assert_eq!(fruits.field_lists().count(), fruit.fields().count() - 1);
}

#[tokio::test]
async fn unknown_index_target() {
    init_logging();

    let err = assert_err_is!(
        builder().index("Vegetables").build(Disconnected).await,
        is_invalid_schema
    );
    assert!(err.to_string().contains("Vegetables"), "{err}");
}

#[tokio::test]
async fn schema_is_required() {
    init_logging();
    assert_err_is!(Base::builder().build(Disconnected).await, is_invalid_schema);
}

#[tokio::test]
async fn schema_from_path() {
    init_logging();

    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/schema.json");
    let base = Base::builder()
        .schema_path(path)
        .build(Disconnected)
        .await
        .unwrap();
    assert_eq!(base.model_types().len(), 4);

    let err = assert_err!(
        Base::builder()
            .schema_path("no/such/schema.json")
            .build(Disconnected)
            .await
    );
    assert!(err.to_string().contains("no/such/schema.json"), "{err}");
}

#[tokio::test]
async fn bases_do_not_share_registries() {
    init_logging();

    let plain = builder().build(Disconnected).await.unwrap();
    let renamed = builder()
        .renamer(|name| name.replace("Fruits", "Berries"))
        .build(Disconnected)
        .await
        .unwrap();

    assert_ok!(plain.model_type("Fruit"));
    assert_err!(plain.model_type("Berry"));
    assert_ok!(renamed.model_type("Berry"));
    assert_err!(renamed.model_type("Fruit"));
}
