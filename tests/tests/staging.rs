use airstorm::Value;
use tests::*;

#[tokio::test]
async fn set_is_local_to_the_instance() {
    let mut test = BaseTest::new();
    let base = test.setup().await;
    let fruit_type = assert_ok!(base.model_type("Fruit"));

    let apple = assert_ok!(fruit_type.get("recApple").await);
    let mango = assert_ok!(fruit_type.get("recMango").await);

    assert_ok!(apple.set(&base, "season", "Autumn"));
    assert_eq!(assert_ok!(apple.get(&base, "season").await), Value::from("Autumn"));

    // Another record of the same type is untouched
    assert_eq!(assert_ok!(mango.get(&base, "season").await), Value::from("Summer"));

    // The cached record is untouched
    let record = assert_ok!(apple.record(&base).await);
    assert_eq!(record.field("Season"), Some(&Value::from("Winter")));

    // Nothing was sent to the service
    assert_eq!(test.log().len(), 2);
}

#[tokio::test]
async fn discard_restores_the_cached_value() {
    let mut test = BaseTest::new();
    let base = test.setup().await;
    let apple = assert_ok!(assert_ok!(base.model_type("Fruit")).get("recApple").await);

    assert_ok!(apple.set(&base, "calories", 100));
    assert_eq!(assert_ok!(apple.get(&base, "calories").await), Value::from(100));

    assert_ok!(apple.discard(&base, "calories"));
    assert_eq!(assert_ok!(apple.get(&base, "calories").await), Value::from(95));

    // Discarding without an edit is fine
    assert_ok!(apple.discard(&base, "calories"));
}

#[tokio::test]
async fn staged_null_reads_the_default() {
    let mut test = BaseTest::new();
    let base = test.setup().await;
    let apple = assert_ok!(assert_ok!(base.model_type("Fruit")).get("recApple").await);

    assert_ok!(apple.set(&base, "price", Value::Null));
    assert_eq!(assert_ok!(apple.get(&base, "price").await), Value::F64(0.0));
}

#[tokio::test]
async fn staged_links_resolve() {
    let mut test = BaseTest::new();
    let base = test.setup().await;
    let kiwi = assert_ok!(assert_ok!(base.model_type("Fruit")).get("recKiwi").await);

    assert_ok!(kiwi.set(&base, "farm", vec!["recGrove"]));
    let farm = assert_ok!(assert_ok!(kiwi.get(&base, "farm").await).into_one());
    assert_eq!(farm.id(), "recGrove");
    assert_eq!(farm.describe(&base), "Mango Grove");
}

#[tokio::test]
async fn read_only_fields_reject_edits() {
    let mut test = BaseTest::new();
    let base = test.setup().await;

    let apple = assert_ok!(assert_ok!(base.model_type("Fruit")).get("recApple").await);
    let err = assert_err_is!(apple.set(&base, "label", "Shiny"), is_validation);
    assert_eq!(err.to_string(), "Fruit.label is a read only field");

    let green = assert_ok!(assert_ok!(base.model_type("Smoothie")).get("recGreen").await);
    assert_err_is!(green.set(&base, "total_calories", 1), is_validation);

    assert_eq!(
        assert_ok!(apple.get(&base, "label").await),
        Value::from("Apple (Winter)")
    );
}

#[tokio::test]
async fn empty_instance_rejects_edits() {
    let mut test = BaseTest::new();
    let base = test.setup().await;
    let fruit_type = assert_ok!(base.model_type("Fruit"));

    let empty = fruit_type.empty();
    assert_err_is!(empty.set(&base, "name", "Ghost"), is_validation);
    assert_eq!(assert_ok!(empty.get(&base, "name").await), Value::from(""));
}

#[tokio::test]
async fn list_writes() {
    let mut test = BaseTest::new();
    let base = test.setup().await;

    let list_type = assert_ok!(base.model_list_type("FruitList"));
    let fruits = assert_ok!(list_type.find(&base, "{Season} = 'Winter'").await);
    assert_eq!(fruits.ids(), ["recApple", "recKiwi"]);

    assert_ok!(fruits.set_each(&base, "calories", vec![Value::from(1), Value::from(2)]));
    assert_eq!(
        assert_ok!(fruits.get_field(&base, "calories").await),
        [Value::from(1), Value::from(2)]
    );

    assert_ok!(fruits.set_all(&base, "seasons", "Spring"));
    assert_eq!(
        assert_ok!(fruits.get_field(&base, "seasons").await),
        [Value::from("Spring"), Value::from("Spring")]
    );

    assert_ok!(fruits.discard(&base, "seasons"));
    assert_eq!(
        assert_ok!(fruits.get_field(&base, "seasons").await),
        [Value::from("Winter"), Value::from("Winter")]
    );

    // Calories are still staged
    assert_eq!(
        assert_ok!(fruits.get_field(&base, "calories").await),
        [Value::from(1), Value::from(2)]
    );
}

#[tokio::test]
async fn failed_list_writes_stage_nothing() {
    let mut test = BaseTest::new();
    let base = test.setup().await;
    let fruit_type = assert_ok!(base.model_type("Fruit"));
    let list_type = assert_ok!(base.model_list_type("FruitList"));

    let apple = assert_ok!(fruit_type.get("recApple").await);
    let fruits = assert_ok!(list_type.new_list(&base, vec![apple.clone(), fruit_type.empty()]));

    assert_err_is!(fruits.set_all(&base, "names", "Changed"), is_validation);
    assert_err_is!(
        fruits.set_each(&base, "names", vec![Value::from("A"), Value::from("B")]),
        is_validation
    );
    assert_eq!(assert_ok!(apple.get(&base, "name").await), Value::from("Apple"));

    // A read-only field fails before any member is touched
    let winter = assert_ok!(list_type.find(&base, "{Season} = 'Winter'").await);
    assert_err_is!(winter.set_all(&base, "labels", "Fresh"), is_validation);
    assert_eq!(
        assert_ok!(winter.get_field(&base, "labels").await),
        [Value::from("Apple (Winter)"), Value::from("Kiwi (Winter)")]
    );
}

#[tokio::test]
async fn set_each_checks_length() {
    let mut test = BaseTest::new();
    let base = test.setup().await;

    let list_type = assert_ok!(base.model_list_type("FruitList"));
    let fruits = assert_ok!(list_type.find(&base, "").await);

    let err = assert_err_is!(
        fruits.set_each(&base, "names", vec![Value::from("A"), Value::from("B")]),
        is_validation
    );
    assert_eq!(err.to_string(), "expected 4 values but got 2");

    // Nothing was staged
    assert_eq!(
        assert_ok!(fruits.get_field(&base, "names").await),
        [
            Value::from("Apple"),
            Value::from("Mango"),
            Value::from("Kiwi"),
            Value::from("Peach")
        ]
    );
}

#[tokio::test]
async fn edits_are_scoped_to_their_base() {
    let mut test = BaseTest::new();
    let base = test.setup().await;
    let other = BaseTest::new().setup().await;

    let apple = assert_ok!(assert_ok!(base.model_type("Fruit")).get("recApple").await);
    assert_ok!(apple.set(&base, "name", "Green Apple"));

    assert_eq!(assert_ok!(apple.get(&other, "name").await), Value::from("Apple"));

    // Clones share the base
    let clone = base.clone();
    assert_eq!(
        assert_ok!(apple.get(&clone, "name").await),
        Value::from("Green Apple")
    );
}
