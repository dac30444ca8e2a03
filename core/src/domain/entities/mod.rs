//! Domain entities representing core business objects.

pub mod order;
pub mod token;
pub mod user;


// Re-export commonly used types
pub use order::{Order, OrderStatus, OrderStatusState, PaymentMethod, PaymentStatus, TimelineEntry};
pub use token::{Claims, TokenPair, TokenType};
pub use user::{
    Address, AddressType, PreferencesPatch, ProfileUpdate, User, UserPreferences, UserProfile,
};
