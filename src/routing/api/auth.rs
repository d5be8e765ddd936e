use axum::Router;
use axum::routing::{get, post, MethodRouter};

use crate::routing::guard::{self, Access};
use crate::routing::handle;
use crate::state::ArcShared;

pub struct Route {
    pub path: &'static str,
    pub access: Access,
    pub handler: MethodRouter<ArcShared>,
}

pub fn table() -> Vec<Route> {
    vec![
        Route {
            path: "/signup",
            access: Access::Public,
            handler: post(handle::auth::signup),
        },
        Route {
            path: "/login",
            access: Access::Public,
            handler: post(handle::auth::login),
        },
        Route {
            path: "/me",
            access: Access::Session,
            handler: get(handle::auth::me),
        },
    ]
}

pub fn routes(state: &ArcShared) -> Router<ArcShared> {
    let mut router = Router::new();

    for route in table() {
        router = router.route(route.path, guard::apply(route.access, route.handler, state));
    }

    router
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn only_me_requires_a_session() {
        let access: Vec<(&str, Access)> = table()
            .into_iter()
            .map(|route| (route.path, route.access))
            .collect();

        assert_eq!(access, vec![
            ("/signup", Access::Public),
            ("/login", Access::Public),
            ("/me", Access::Session),
        ]);
    }
}
