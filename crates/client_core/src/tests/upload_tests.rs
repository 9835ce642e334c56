use super::*;

fn complete_form() -> RecipeForm {
    RecipeForm::new()
        .with("title", "Grandma's rice")
        .with("sourceUrl", "https://example.com/rice")
        .with("image", "https://example.com/rice.jpg")
        .with("publisher", "Grandma")
        .with("cookingTime", "25")
        .with("servings", "4")
        .with("ingredient-1", "0.5,Kg,Rice")
        .with("ingredient-2", "")
        .with("ingredient-3", " 1 , , Avocado ")
        .with("ingredient-4", ",,Salt")
}

#[test]
fn three_part_ingredient_parses() {
    let ingredient = parse_ingredient("0.5,Kg,Rice").expect("parse");
    assert_eq!(ingredient, Ingredient::new(Some(0.5), "Kg", "Rice"));
}

#[test]
fn two_part_ingredient_is_rejected() {
    let err = parse_ingredient("Kg,Rice").expect_err("must fail");
    match err {
        ClientError::Validation { detail } => assert_eq!(detail, INGREDIENT_FORMAT_HINT),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn four_part_ingredient_is_rejected() {
    assert!(parse_ingredient("1,Kg,Rice,extra").is_err());
}

#[test]
fn empty_quantity_means_unspecified() {
    let ingredient = parse_ingredient(",,Salt").expect("parse");
    assert_eq!(ingredient.quantity, None);
    assert_eq!(ingredient.unit, "");
    assert_eq!(ingredient.description, "Salt");
}

#[test]
fn non_numeric_quantity_is_rejected() {
    let err = parse_ingredient("lots,Kg,Rice").expect_err("must fail");
    assert!(err.to_string().contains("invalid ingredient quantity 'lots'"));
}

#[test]
fn only_filled_ingredient_fields_are_collected_in_order() {
    let ingredients = parse_ingredients(&complete_form()).expect("parse");
    assert_eq!(
        ingredients,
        vec![
            Ingredient::new(Some(0.5), "Kg", "Rice"),
            Ingredient::new(Some(1.0), "", "Avocado"),
            Ingredient::new(None, "", "Salt"),
        ]
    );
}

#[test]
fn ingredient_fields_beyond_range_are_ignored() {
    let form = RecipeForm::new()
        .with("ingredient-1", "1,,Egg")
        .with("ingredient-7", "not,even,checked,here");
    assert_eq!(parse_ingredients(&form).expect("parse").len(), 1);
}

#[test]
fn payload_maps_form_fields_to_wire_names() {
    let payload = build_payload(&complete_form()).expect("payload");
    assert_eq!(payload.title, "Grandma's rice");
    assert_eq!(payload.source_url, "https://example.com/rice");
    assert_eq!(payload.image_url, "https://example.com/rice.jpg");
    assert_eq!(payload.cooking_time, 25);
    assert_eq!(payload.servings, 4);
    assert_eq!(payload.ingredients.len(), 3);

    let wire = serde_json::to_value(&payload).expect("encode");
    assert!(wire.get("source_url").is_some());
    assert!(wire.get("cooking_time").is_some());
    assert!(wire["ingredients"][2]["quantity"].is_null());
}

#[test]
fn bad_ingredient_fails_whole_payload() {
    let form = complete_form().with("ingredient-5", "Kg,Rice");
    assert!(matches!(
        build_payload(&form),
        Err(ClientError::Validation { .. })
    ));
}

#[test]
fn missing_or_invalid_numbers_are_rejected() {
    let form = complete_form().with("servings", "");
    assert!(build_payload(&form)
        .expect_err("must fail")
        .to_string()
        .contains("servings"));

    let form = complete_form().with("servings", "0");
    assert!(build_payload(&form).is_err());

    let form = complete_form().with("cookingTime", "soon");
    assert!(build_payload(&form)
        .expect_err("must fail")
        .to_string()
        .contains("cookingTime"));
}

#[test]
fn form_collects_from_pairs() {
    let form: RecipeForm = [("title", "Soup"), ("servings", "2")].into_iter().collect();
    assert_eq!(form.get("title"), Some("Soup"));
    assert_eq!(form.get("missing"), None);
}
