use airstorm::{FieldValue, Value};
use tests::*;

#[tokio::test]
async fn get_fetches_once_then_serves_from_cache() {
    let mut test = BaseTest::new();
    let base = test.setup().await;
    assert!(test.log().is_empty());

    let fruit_type = assert_ok!(base.model_type("Fruit"));
    let apple = assert_ok!(fruit_type.get("recApple").await);
    assert_eq!(test.log().get_records(), 1);

    assert_eq!(assert_ok!(apple.get(&base, "name").await), Value::from("Apple"));
    assert_eq!(assert_ok!(apple.get(&base, "calories").await), Value::from(95));
    assert_ok!(fruit_type.get("recApple").await);

    assert_eq!(test.log().len(), 1);
}

#[tokio::test]
async fn unknown_record_is_the_empty_instance() {
    let mut test = BaseTest::new();
    let base = test.setup().await;
    let fruit_type = assert_ok!(base.model_type("Fruit"));

    let nope = assert_ok!(fruit_type.get("recNope").await);
    assert!(!nope.exists());
    assert_eq!(nope, fruit_type.empty());
    assert_eq!(nope.describe(&base), "");

    // The miss is remembered
    assert_ok!(fruit_type.get("recNope").await);
    assert_eq!(test.log().get_records(), 1);

    // The empty instance reads defaults without any round trip
    assert_eq!(assert_ok!(nope.get(&base, "name").await), Value::from(""));
    assert_eq!(assert_ok!(nope.get(&base, "calories").await), Value::from(0));
    assert_eq!(test.log().len(), 1);
}

#[tokio::test]
async fn instances_compare_by_table_and_id() {
    let mut test = BaseTest::new();
    let base = test.setup().await;

    let fruit_type = assert_ok!(base.model_type("Fruit"));
    let a = assert_ok!(fruit_type.get("recApple").await);
    let b = assert_ok!(fruit_type.get("recApple").await);
    let mango = assert_ok!(fruit_type.get("recMango").await);

    assert_eq!(a, b);
    assert_ne!(a, mango);

    // Empty instances of different types differ
    let smoothie_type = assert_ok!(base.model_type("Smoothie"));
    assert_ne!(fruit_type.empty(), smoothie_type.empty());
}

#[tokio::test]
async fn many_link_is_fetched_in_one_batch() {
    let mut test = BaseTest::new();
    let base = test.setup().await;

    let smoothie = assert_ok!(assert_ok!(base.model_type("Smoothie")).get("recSunrise").await);
    let fruits = assert_ok!(assert_ok!(smoothie.get(&base, "fruits").await).into_many());

    assert_eq!(fruits.ids(), ["recMango", "recKiwi", "recPeach"]);
    assert_eq!(test.log().get_records(), 1);
    assert_eq!(test.log().list_records(), 1);
    assert_eq!(test.log().count_table("tblFruits"), 1);

    let names = assert_ok!(fruits.get_field(&base, "names").await);
    assert_eq!(
        names,
        [Value::from("Mango"), Value::from("Kiwi"), Value::from("Peach")]
    );
    assert_eq!(test.log().len(), 2);
}

#[tokio::test]
async fn single_link_is_fetched_directly() {
    let mut test = BaseTest::new();
    let base = test.setup().await;

    let green = assert_ok!(assert_ok!(base.model_type("Smoothie")).get("recGreen").await);
    let main_fruit = assert_ok!(assert_ok!(green.get(&base, "main_fruit").await).into_one());

    assert_eq!(main_fruit.id(), "recApple");
    assert_eq!(main_fruit.table_id().as_str(), "tblFruits");
    assert_eq!(test.log().get_records(), 2);
    assert_eq!(test.log().list_records(), 0);
}

#[tokio::test]
async fn single_link_resolves_only_its_first_id() {
    let mut test = BaseTest::new();
    test.memory().load(
        "tblSmoothies",
        [airstorm::RawRecord::new("recDouble")
            .with_field("Name", "Double Trouble")
            .with_field("Main Fruit", vec!["recKiwi", "recPeach"])],
    );
    let base = test.setup().await;
    let smoothie_type = assert_ok!(base.model_type("Smoothie"));
    let fruit_type = assert_ok!(base.model_type("Fruit"));

    let double = assert_ok!(smoothie_type.get("recDouble").await);
    let main_fruit = assert_ok!(assert_ok!(double.get(&base, "main_fruit").await).into_one());
    assert_eq!(main_fruit.id(), "recKiwi");

    assert_eq!(test.log().count_table("tblFruits"), 1);
    assert_eq!(test.log().list_records(), 0);
    assert!(!fruit_type.cache().contains("recPeach"));

    // List reads only batch the first id of each to-one link
    let list_type = assert_ok!(base.model_list_type("SmoothieList"));
    let smoothies = assert_ok!(list_type.new_list(&base, vec![double]));
    assert_ok!(smoothies.get_field(&base, "main_fruits").await);
    assert!(!fruit_type.cache().contains("recPeach"));
}

#[tokio::test]
async fn links_to_missing_records_read_as_empty_instances() {
    let mut test = BaseTest::new();
    test.memory().load(
        "tblSmoothies",
        [airstorm::RawRecord::new("recMystery")
            .with_field("Name", "Mystery")
            .with_field("Fruits", vec!["recApple", "recGone"])],
    );
    let base = test.setup().await;

    let mystery = assert_ok!(assert_ok!(base.model_type("Smoothie")).get("recMystery").await);
    let fruits = assert_ok!(assert_ok!(mystery.get(&base, "fruits").await).into_many());

    assert_eq!(fruits.len(), 2);
    assert!(fruits.get(0).unwrap().exists());
    assert!(!fruits.get(1).unwrap().exists());

    let names = assert_ok!(fruits.get_field(&base, "names").await);
    assert_eq!(names, [Value::from("Apple"), Value::from("")]);

    // One lookup for the smoothie, one batch for its fruits
    assert_eq!(test.log().len(), 2);
}

#[tokio::test]
async fn describe_uses_primary_column() {
    let mut test = BaseTest::new();
    let base = test.setup().await;

    let orchard = assert_ok!(assert_ok!(base.model_type("Farm")).get("recOrchard").await);
    assert_eq!(orchard.describe(&base), "Sunny Orchard");

    let context = assert_ok!(base.model_type("Context"));
    let main = assert_ok!(context.get("recMainContext").await);
    assert_eq!(main.describe(&base), "Main");
}

#[tokio::test]
async fn unknown_attribute() {
    let mut test = BaseTest::new();
    let base = test.setup().await;

    let apple = assert_ok!(assert_ok!(base.model_type("Fruit")).get("recApple").await);
    let err = assert_err_is!(apple.get(&base, "colour").await, is_unknown_attribute);
    assert_eq!(err.to_string(), "`Fruit` has no attribute `colour`");
}

#[tokio::test]
async fn field_value_accessors() {
    let mut test = BaseTest::new();
    let base = test.setup().await;

    let apple = assert_ok!(assert_ok!(base.model_type("Fruit")).get("recApple").await);

    let name = assert_ok!(apple.get(&base, "name").await);
    assert_eq!(name.as_value(), Some(&Value::from("Apple")));
    assert_none!(name.as_one());
    assert_err!(name.clone().into_many());

    let farm = assert_ok!(apple.get(&base, "farm").await);
    assert!(matches!(&farm, FieldValue::One(model) if model.id() == "recOrchard"));
    assert_eq!(farm.sort_key(), Value::from("recOrchard"));

    let smoothies = assert_ok!(apple.get(&base, "smoothies").await);
    assert_eq!(smoothies.keys(), [Value::from("recGreen")]);
}

#[tokio::test]
async fn unimplemented_operations() {
    let mut test = BaseTest::new();
    let base = test.setup().await;

    let fruit_type = assert_ok!(base.model_type("Fruit"));
    let apple = assert_ok!(fruit_type.get("recApple").await);
    apple.set(&base, "name", "Green Apple").unwrap();

    assert_err_is!(apple.push(), is_unsupported_feature);
    assert_err_is!(apple.delete(), is_unsupported_feature);
    assert_err_is!(apple.revert(), is_unsupported_feature);

    let list_type = assert_ok!(base.model_list_type("FruitList"));
    let list = assert_ok!(list_type.new_list(&base, [apple.clone()]));
    assert_err_is!(list.push(), is_unsupported_feature);
    assert_err_is!(list.delete(), is_unsupported_feature);
    assert_err_is!(list.revert(), is_unsupported_feature);

    // Nothing changed
    assert_eq!(
        assert_ok!(apple.get(&base, "name").await),
        Value::from("Green Apple")
    );
    assert_eq!(test.log().len(), 1);
}
