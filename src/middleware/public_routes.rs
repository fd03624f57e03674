use axum::http::Method;

/// Methods a route serves without a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Methods {
    Any,
    List(Vec<Method>),
}

#[derive(Debug, Clone)]
pub struct PublicRoute {
    /// Literal path; segments starting with `:` match any single segment.
    pub path: &'static str,
    pub methods: Methods,
}

impl PublicRoute {
    pub fn allows(&self, method: &Method) -> bool {
        match &self.methods {
            Methods::Any => true,
            Methods::List(methods) => methods.contains(method),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        let mut pattern = self.path.split('/');
        let mut actual = path.split('/');
        loop {
            match (pattern.next(), actual.next()) {
                (None, None) => return true,
                (Some(p), Some(a)) if p.starts_with(':') => {
                    if a.is_empty() {
                        return false;
                    }
                }
                (Some(p), Some(a)) if p == a => {}
                _ => return false,
            }
        }
    }
}

/// Routes the gate knows about. Anything under `/api` not listed here is denied.
/// The preferences route is known but serves no method publicly.
pub fn default_public_routes() -> Vec<PublicRoute> {
    vec![
        PublicRoute {
            path: "/api/users/login",
            methods: Methods::Any,
        },
        PublicRoute {
            path: "/api/users",
            methods: Methods::List(vec![Method::POST]),
        },
        PublicRoute {
            path: "/api/articles",
            methods: Methods::List(vec![Method::GET]),
        },
        PublicRoute {
            path: "/api/users/:id/preferences",
            methods: Methods::List(Vec::new()),
        },
    ]
}

pub fn find_route<'a>(routes: &'a [PublicRoute], path: &str) -> Option<&'a PublicRoute> {
    routes.iter().find(|route| route.matches(path))
}
