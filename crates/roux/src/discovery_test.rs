// Copyright (c) Contributors to the Roux project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;
use tempfile::TempDir;

use super::*;

fn create_marker(root: &Path, ingredient: &str) {
    let dir = root.join(ingredient);
    std::fs::create_dir_all(&dir).expect("Failed to create ingredient dir");
    std::fs::write(dir.join(INGREDIENT_MARKER_FILENAME), "# ingredient").expect("Failed to write marker");
}

fn names(ingredients: &BTreeMap<String, Ingredient>) -> Vec<&str> {
    ingredients.keys().map(String::as_str).collect()
}

#[rstest]
#[tokio::test]
async fn test_discover_single_ingredient() {
    let tmp = TempDir::new().unwrap();
    create_marker(tmp.path(), "ingredient");

    let ingredients = discover_ingredients(tmp.path(), "pantry")
        .await
        .expect("Should discover ingredients");

    assert_eq!(names(&ingredients), vec!["ingredient"]);
    let ingredient = &ingredients["ingredient"];
    assert_eq!(ingredient.name, "ingredient");
    assert_eq!(ingredient.path, tmp.path().join("ingredient"));
    assert_eq!(ingredient.pantry_name, "pantry");
    assert!(ingredient.entry_points.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_deep_ingredients_are_named_by_path() {
    let tmp = TempDir::new().unwrap();
    create_marker(tmp.path(), "path/to/ingredient");
    create_marker(tmp.path(), "other");

    let ingredients = discover_ingredients(tmp.path(), "pantry").await.unwrap();

    assert_eq!(names(&ingredients), vec!["other", "path/to/ingredient"]);
    assert_eq!(ingredients["path/to/ingredient"].name, "path/to/ingredient");
}

#[rstest]
#[tokio::test]
async fn test_nested_ingredients_are_ignored() {
    let tmp = TempDir::new().unwrap();
    create_marker(tmp.path(), "a");
    create_marker(tmp.path(), "a/b");
    create_marker(tmp.path(), "a/b/c");

    let ingredients = discover_ingredients(tmp.path(), "pantry").await.unwrap();

    assert_eq!(names(&ingredients), vec!["a"]);
}

#[rstest]
#[tokio::test]
async fn test_sibling_prefix_is_not_nesting() {
    let tmp = TempDir::new().unwrap();
    create_marker(tmp.path(), "prefix");
    create_marker(tmp.path(), "prefixed");

    let ingredients = discover_ingredients(tmp.path(), "pantry").await.unwrap();

    assert_eq!(names(&ingredients), vec!["prefix", "prefixed"]);
}

#[rstest]
#[tokio::test]
async fn test_directories_without_marker_are_skipped() {
    let tmp = TempDir::new().unwrap();
    create_marker(tmp.path(), "ingredient");
    std::fs::create_dir_all(tmp.path().join("not-an-ingredient/child")).unwrap();
    std::fs::write(tmp.path().join("not-an-ingredient/README.md"), "").unwrap();

    let ingredients = discover_ingredients(tmp.path(), "pantry").await.unwrap();

    assert_eq!(names(&ingredients), vec!["ingredient"]);
}

#[rstest]
#[tokio::test]
async fn test_missing_root_has_no_ingredients() {
    let tmp = TempDir::new().unwrap();

    let ingredients = discover_ingredients(&tmp.path().join("missing"), "pantry")
        .await
        .expect("Missing root should not be an error");

    assert!(ingredients.is_empty());
}

#[rstest]
#[case("path/to/foo/bar", "path/to/foo", true)]
#[case("path/to/foo", "path/to/foo", false)]
#[case("path/to/foobar", "path/to/foo", false)]
#[case("path/to", "path/to/foo", false)]
#[case("/abs/a/b", "/abs/a", true)]
fn test_is_nested_within(#[case] path: &str, #[case] ancestor: &str, #[case] expected: bool) {
    assert_eq!(is_nested_within(Path::new(path), Path::new(ancestor)), expected);
}

#[rstest]
#[tokio::test]
async fn test_hidden_directories_are_skipped() {
    let tmp = TempDir::new().unwrap();
    create_marker(tmp.path(), ".hidden/x");
    create_marker(tmp.path(), "plain/.cache");
    create_marker(tmp.path(), "shown");

    let ingredients = discover_ingredients(tmp.path(), "pantry").await.unwrap();

    assert_eq!(names(&ingredients), vec!["shown"]);
}

#[cfg(unix)]
#[rstest]
#[tokio::test]
async fn test_symlinked_directories_are_not_followed() {
    let tmp = TempDir::new().unwrap();
    create_marker(tmp.path(), "a");
    std::fs::create_dir_all(tmp.path().join("b")).unwrap();
    std::os::unix::fs::symlink(tmp.path(), tmp.path().join("b/loop")).unwrap();
    std::os::unix::fs::symlink(tmp.path().join("a"), tmp.path().join("linked")).unwrap();

    let ingredients = discover_ingredients(tmp.path(), "pantry").await.unwrap();

    assert_eq!(names(&ingredients), vec!["a"]);
}

#[cfg(unix)]
#[rstest]
#[tokio::test]
async fn test_symlinked_pantry_root_is_searched() {
    let tmp = TempDir::new().unwrap();
    create_marker(&tmp.path().join("real"), "ingredient");
    std::os::unix::fs::symlink(tmp.path().join("real"), tmp.path().join("linked")).unwrap();

    let root = tmp.path().join("linked");
    let ingredients = discover_ingredients(&root, "pantry").await.unwrap();

    assert_eq!(names(&ingredients), vec!["ingredient"]);
    assert_eq!(ingredients["ingredient"].path, root.join("ingredient"));
}
