//! One module per syntax element. Each owns its delimiter constants, its
//! open matcher, and (for multi-line kinds) its continuation predicate, so
//! syntax knowledge is not scattered through classifier or builder code.

mod block_quote;
mod code_fence;
mod heading;
mod list_item;
mod rule_line;
mod think_tag;

pub use block_quote::BlockQuote;
pub use code_fence::CodeFence;
pub use heading::Heading;
pub use list_item::ListItem;
pub use rule_line::RuleLine;
pub use think_tag::ThinkTag;
