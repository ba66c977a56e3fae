mod common;

use serde_json::json;
use skill_core::{ActionDefinition, ParamLocation, ParamType, ParameterSpec};
use skill_exec::{bind, ArgumentBag, BindingError};

use common::{bulk_labels_action, repo_issues_action};

#[test]
fn binds_each_location_in_declaration_order() {
    let args = ArgumentBag::new()
        .with_path("repo", json!("b"))
        .with_path("owner", json!("a"))
        .with_query("page", json!(2))
        .with_query("tags", json!(["x", "y"]));

    let bound = bind(&repo_issues_action(), &args).unwrap();
    assert_eq!(
        bound.path,
        vec![("owner".to_string(), json!("a")), ("repo".to_string(), json!("b"))]
    );
    assert_eq!(
        bound.query,
        vec![("tags".to_string(), json!(["x", "y"])), ("page".to_string(), json!(2))]
    );
    assert!(bound.body.is_empty());
    assert!(bound.root_body.is_none());
}

#[test]
fn missing_required_fails_fast() {
    let args = ArgumentBag::new().with_path("owner", json!("a"));
    let err = bind(&repo_issues_action(), &args).unwrap_err();
    assert_eq!(
        err,
        BindingError::MissingRequiredParameter {
            location: ParamLocation::Path,
            name: "repo".to_string(),
        }
    );
    assert_eq!(err.to_string(), "missing required path param 'repo'");
}

#[test]
fn value_in_the_wrong_bag_does_not_count() {
    // `owner` is a path parameter; supplying it as a query argument does not satisfy it.
    let args = ArgumentBag::new()
        .with_query("owner", json!("a"))
        .with_path("repo", json!("b"));
    let err = bind(&repo_issues_action(), &args).unwrap_err();
    assert!(matches!(
        err,
        BindingError::MissingRequiredParameter { ref name, .. } if name == "owner"
    ));
}

#[test]
fn null_counts_as_absent() {
    let args = ArgumentBag::new()
        .with_path("owner", json!("a"))
        .with_path("repo", json!(null));
    assert!(matches!(
        bind(&repo_issues_action(), &args),
        Err(BindingError::MissingRequiredParameter { .. })
    ));
}

#[test]
fn optional_parameters_may_be_omitted() {
    let args = ArgumentBag::new()
        .with_path("owner", json!("a"))
        .with_path("repo", json!("b"));
    let bound = bind(&repo_issues_action(), &args).unwrap();
    assert!(bound.query.is_empty());
}

#[test]
fn root_body_takes_the_array() {
    let args = ArgumentBag::new()
        .with_path("number", json!(7))
        .with_body("labels", json!([1, 2, 3]))
        .with_body("note", json!("hi"));
    let bound = bind(&bulk_labels_action(), &args).unwrap();
    assert_eq!(bound.root_body, Some(vec![json!(1), json!(2), json!(3)]));
    assert!(!bound.body.contains_key("labels"));
}

#[test]
fn root_body_must_be_an_array() {
    let args = ArgumentBag::new()
        .with_path("number", json!(7))
        .with_body("labels", json!({"name": "bug"}));
    let err = bind(&bulk_labels_action(), &args).unwrap_err();
    assert_eq!(
        err,
        BindingError::InvalidRootBodyType {
            name: "labels".to_string(),
            found: "object",
        }
    );
}

#[test]
fn top_level_type_is_checked() {
    let args = ArgumentBag::new()
        .with_path("owner", json!("a"))
        .with_path("repo", json!("b"))
        .with_query("page", json!("two"));
    let err = bind(&repo_issues_action(), &args).unwrap_err();
    assert_eq!(
        err,
        BindingError::TypeMismatch {
            location: ParamLocation::Query,
            name: "page".to_string(),
            expected: ParamType::Integer,
            found: "string",
        }
    );
}

#[test]
fn integral_doubles_bind_as_integers() {
    let args = ArgumentBag::new()
        .with_path("owner", json!("a"))
        .with_path("repo", json!("b"))
        .with_query("page", json!(3.0));
    assert!(bind(&repo_issues_action(), &args).is_ok());
}

#[test]
fn enum_is_enforced_on_scalars() {
    let def = ActionDefinition::new("search", "GET", "https://api.example.com/issues").with_param(
        ParameterSpec::new("state", ParamType::String, ParamLocation::Query)
            .with_enum(vec![json!("open"), json!("closed")]),
    );
    let ok = ArgumentBag::new().with_query("state", json!("open"));
    assert!(bind(&def, &ok).is_ok());

    let bad = ArgumentBag::new().with_query("state", json!("merged"));
    assert!(matches!(bind(&def, &bad), Err(BindingError::NotInEnum { .. })));
}

#[test]
fn nested_shapes_are_not_validated() {
    let mut user = ParameterSpec::new("user", ParamType::Object, ParamLocation::Body).required();
    user.properties = vec![
        ParameterSpec::new("login", ParamType::String, ParamLocation::Body).required(),
    ];
    let def = ActionDefinition::new("create", "POST", "https://api.example.com/users").with_param(user);

    // `login` is missing and `extra` is undeclared; only the top level matters.
    let args = ArgumentBag::new().with_body("user", json!({"extra": 1}));
    let bound = bind(&def, &args).unwrap();
    assert_eq!(bound.body["user"], json!({"extra": 1}));
}

#[test]
fn undeclared_arguments_are_dropped() {
    let args = ArgumentBag::new()
        .with_path("owner", json!("a"))
        .with_path("repo", json!("b"))
        .with_query("debug", json!(true));
    let bound = bind(&repo_issues_action(), &args).unwrap();
    assert!(bound.query.iter().all(|(k, _)| k != "debug"));
}

#[test]
fn argument_bag_deserializes_with_missing_sections() {
    let args: ArgumentBag = serde_json::from_value(json!({"path": {"owner": "a"}})).unwrap();
    assert_eq!(args.path["owner"], json!("a"));
    assert!(args.query.is_empty());
    assert!(args.body.is_empty());
}
