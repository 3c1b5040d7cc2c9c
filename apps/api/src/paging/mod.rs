// "Load more" buttons under the members, companies and jobs grids.

pub mod client;
pub mod pager;

pub use client::{HttpPageClient, PageError, PageSource};
pub use pager::{Listing, LoadMorePager, PageOutcome, PageRequest, PAGE_SIZE};
