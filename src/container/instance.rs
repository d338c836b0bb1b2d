//! Injectable types and the type-erased singleton handle.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use super::token::Token;
use super::Container;
use crate::error::ModuleError;

/// A type that can be constructed by a [`Container`].
///
/// The constructor pulls its dependencies from the container it is built in,
/// so the tokens a type depends on are spelled out in code:
///
/// ```ignore
/// impl Injectable for Mailer {
///     fn construct(container: &Container) -> Result<Self, ModuleError> {
///         Ok(Mailer { transport: container.resolve::<dyn Transport>()? })
///     }
/// }
/// ```
pub trait Injectable: 'static {
    fn construct(container: &Container) -> Result<Self, ModuleError>
    where
        Self: Sized;
}

/// Conversion from a concrete provider to the token type it is bound under.
///
/// Every type implements this for itself. Bind an implementation to an
/// interface token by implementing it for the trait object:
///
/// ```ignore
/// impl Implements<dyn Transport> for SmtpTransport {
///     fn upcast(self: Rc<Self>) -> Rc<dyn Transport> { self }
/// }
/// ```
pub trait Implements<T: ?Sized + 'static>: 'static {
    fn upcast(self: Rc<Self>) -> Rc<T>;
}

impl<T: 'static> Implements<T> for T {
    fn upcast(self: Rc<Self>) -> Rc<T> {
        self
    }
}

/// Implement [`Injectable`] through `Default` for types without dependencies.
#[macro_export]
macro_rules! injectable {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Injectable for $ty {
                fn construct(_: &$crate::Container) -> ::std::result::Result<Self, $crate::ModuleError> {
                    ::std::result::Result::Ok(<$ty as ::std::default::Default>::default())
                }
            }
        )+
    };
}

/// A shared, type-erased provider instance.
///
/// Holds an `Rc<T>` for the token type `T` it was created for. Cloning the
/// handle never clones the provider, so identity survives propagation across
/// containers.
#[derive(Clone)]
pub struct Instance {
    inner: Rc<dyn Any>,
    token: Token,
}

impl Instance {
    pub fn new<T: ?Sized + 'static>(value: Rc<T>) -> Self {
        Instance {
            inner: Rc::new(value),
            token: Token::of::<T>(),
        }
    }

    /// Token of the type the instance is stored as.
    pub fn token(&self) -> Token {
        self.token
    }

    pub fn downcast<T: ?Sized + 'static>(&self) -> Option<Rc<T>> {
        self.inner.downcast_ref::<Rc<T>>().cloned()
    }

    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.inner.is::<Rc<T>>()
    }

    /// Whether both handles refer to the same provider instance.
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instance({})", self.token)
    }
}
