/// Marker/wrapper type for anything that passed authentication
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Authenticated<T>(pub T);

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MaybeAuthenticated<T>(pub Option<T>);

impl<T> From<Authenticated<T>> for MaybeAuthenticated<T> {
    fn from(authenticated: Authenticated<T>) -> Self {
        Self(Some(authenticated.0))
    }
}

impl<T> From<Option<Authenticated<T>>> for MaybeAuthenticated<T> {
    fn from(authenticated: Option<Authenticated<T>>) -> Self {
        match authenticated {
            Some(authenticated) => Self(Some(authenticated.0)),
            None => Self(None),
        }
    }
}
