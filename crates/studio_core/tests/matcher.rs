use studio_core::{find_local_match, StoredAsset};

fn named(name: &str) -> StoredAsset {
    StoredAsset {
        name: Some(name.to_string()),
        data_url: format!("data:{name}"),
    }
}

#[test]
fn whole_name_containment_wins() {
    let assets = vec![named("Neon Cityscape.png")];
    let hit = find_local_match("I want the Neon Cityscape clip", &assets);
    assert_eq!(hit, Some(&assets[0]));
}

#[test]
fn all_words_contained_matches_in_second_pass() {
    let assets = vec![named("Cyberpunk Char.mp4")];
    let hit = find_local_match("show cyberpunk char please", &assets);
    assert_eq!(hit, Some(&assets[0]));

    let scattered = find_local_match("a char in cyberpunk style", &assets);
    assert_eq!(scattered, Some(&assets[0]));
}

#[test]
fn first_pass_beats_earlier_second_pass_candidate() {
    let assets = vec![named("Blue Ocean.mp4"), named("Ocean Blue.mp4")];
    let hit = find_local_match("play ocean blue now", &assets);
    assert_eq!(hit, Some(&assets[1]));
}

#[test]
fn list_order_breaks_ties() {
    let assets = vec![named("Sky.mp4"), named("sky.webm")];
    assert_eq!(find_local_match("the sky", &assets), Some(&assets[0]));
}

#[test]
fn missing_or_blank_names_are_skipped() {
    let assets = vec![
        StoredAsset {
            name: None,
            data_url: "data:none".into(),
        },
        named(".mp4"),
        named("   "),
        named("Forest.mp4"),
    ];
    assert_eq!(find_local_match("forest walk", &assets), Some(&assets[3]));
    assert_eq!(find_local_match("nothing here", &assets), None);
}

#[test]
fn empty_inputs_match_nothing() {
    assert_eq!(find_local_match("anything", &[]), None);
    assert_eq!(find_local_match("", &[named("A.mp4")]), None);
}

#[test]
fn stored_assets_use_browser_field_names() {
    let json = r#"[{"name":"Neon Cityscape.png","dataURL":"data:video/mp4;base64,AAA"},{"dataURL":"x"}]"#;
    let assets: Vec<StoredAsset> = serde_json::from_str(json).unwrap();
    assert_eq!(assets[0].data_url, "data:video/mp4;base64,AAA");
    assert_eq!(assets[1].name, None);
}
