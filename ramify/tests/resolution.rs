use ramify::{Params, ResolveError, ResolveOrder, Router, RouterConfig, Value};

mod common;
use common::{run, tagged};

fn users_router() -> Router {
    let mut router = Router::new();
    router
        .get("/users/list", tagged("list"), &[])
        .unwrap()
        .get("/users/:id", tagged("show"), &[])
        .unwrap()
        .get("/users/:id/edit", tagged("edit"), &[])
        .unwrap()
        .get("/users/:name/view", tagged("view"), &[])
        .unwrap();
    router
}

#[test]
fn test_exact_match_has_no_params() {
    let router = users_router();
    let hit = router.resolve("GET", "users/list", Params::new()).unwrap();
    assert!(hit.params().is_empty());
    assert_eq!(run(&router, "GET", "users/list"), Value::from("list"));
}

#[test]
fn test_parameter_capture() {
    let router = users_router();
    let hit = router.resolve("GET", "users/42", Params::new()).unwrap();
    assert_eq!(hit.params(), &Params::from([("id", "42")]));
}

#[test]
fn test_literal_never_falls_back_to_parameter() {
    common::init_tracing();
    let mut router = Router::new();
    router
        .get("/users/:id", tagged("show"), &[])
        .unwrap()
        .get("/users/list/all", tagged("all"), &[])
        .unwrap();

    let err = router.resolve("GET", "users/list", Params::new()).unwrap_err();
    assert_eq!(
        err,
        ResolveError::NoRouteMatch {
            method: "GET".into(),
            path: "users/list".into()
        }
    );
    assert_eq!(run(&router, "GET", "users/list/all"), Value::from("all"));
}

#[test]
fn test_literal_order_independent_by_default() {
    // Same routes as above, registered literal first.
    let mut router = Router::new();
    router
        .get("/users/list/all", tagged("all"), &[])
        .unwrap()
        .get("/users/:id", tagged("show"), &[])
        .unwrap();
    assert!(router.resolve("GET", "users/list", Params::new()).is_err());
}

#[test]
fn test_insertion_order_mode_tries_parameter_registered_first() {
    let mut router = Router::with_config(
        RouterConfig::default().resolve_order(ResolveOrder::InsertionOrder),
    );
    router
        .get("/users/:id", tagged("show"), &[])
        .unwrap()
        .get("/users/list/all", tagged("all"), &[])
        .unwrap();
    assert_eq!(run(&router, "GET", "users/list"), Value::from("show"));
}

#[test]
fn test_backtracking_drops_failed_binding() {
    common::init_tracing();
    let router = users_router();
    let hit = router.resolve("GET", "users/42/view", Params::new()).unwrap();
    assert_eq!(hit.params(), &Params::from([("name", "42")]));
    assert_eq!(run(&router, "GET", "users/42/view"), Value::from("view"));
    assert_eq!(run(&router, "GET", "users/42/edit"), Value::from("edit"));
}

#[test]
fn test_unknown_method_regardless_of_path() {
    let router = users_router();
    for path in ["", "/", "users/list", "nothing/here"] {
        assert_eq!(
            router.resolve("PATCH", path, Params::new()).unwrap_err(),
            ResolveError::UnknownMethod("PATCH".into()),
        );
    }
}

#[test]
fn test_path_normalization() {
    let router = users_router();
    for path in ["users/42", "users/42/", "/users/42", "users.42", "//users/42//"] {
        let hit = router.resolve("GET", path, Params::new()).unwrap();
        assert_eq!(hit.params().get_str("id"), Some("42"), "path {path:?}");
    }
}

#[test]
fn test_seed_params_survive_and_are_overridden_by_captures() {
    let router = users_router();
    let seed = Params::from([("id", "seed"), ("extra", "kept")]);
    let hit = router.resolve("GET", "users/7", seed).unwrap();
    assert_eq!(hit.params().get_str("id"), Some("7"));
    assert_eq!(hit.params().get_str("extra"), Some("kept"));
}

#[test]
fn test_root_route() {
    let mut router = Router::new();
    router.get("/", tagged("home"), &[]).unwrap();
    assert_eq!(run(&router, "GET", "/"), Value::from("home"));
    assert_eq!(run(&router, "GET", ""), Value::from("home"));
    assert!(router.resolve("GET", "other", Params::new()).is_err());
}

#[test]
fn test_parameter_never_captures_empty_segment() {
    let mut router = Router::new();
    router.get("/files/:name", tagged("file"), &[]).unwrap();
    assert!(router.resolve("GET", "files/", Params::new()).is_err());
}
