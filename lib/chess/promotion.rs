use super::Role;
use derive_more::Display;
use shakmaty as sm;

/// The promotion specifier of a [`Move`][`super::Move`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Promotion {
    #[default]
    #[display(fmt = "")]
    None,
    #[display(fmt = "n")]
    Knight,
    #[display(fmt = "b")]
    Bishop,
    #[display(fmt = "r")]
    Rook,
    #[display(fmt = "q")]
    Queen,
}

#[doc(hidden)]
impl From<Promotion> for Option<sm::Role> {
    fn from(p: Promotion) -> Self {
        match p {
            Promotion::None => None,
            Promotion::Knight => Some(sm::Role::Knight),
            Promotion::Bishop => Some(sm::Role::Bishop),
            Promotion::Rook => Some(sm::Role::Rook),
            Promotion::Queen => Some(sm::Role::Queen),
        }
    }
}

#[doc(hidden)]
impl From<Option<sm::Role>> for Promotion {
    fn from(r: Option<sm::Role>) -> Self {
        match r {
            None => Promotion::None,
            Some(sm::Role::Knight) => Promotion::Knight,
            Some(sm::Role::Bishop) => Promotion::Bishop,
            Some(sm::Role::Rook) => Promotion::Rook,
            Some(sm::Role::Queen) => Promotion::Queen,
            Some(r) => panic!("unexpected promotion to {:?}", r),
        }
    }
}

impl From<Promotion> for Option<Role> {
    fn from(p: Promotion) -> Self {
        Option::<sm::Role>::from(p).map(Role::from)
    }
}
