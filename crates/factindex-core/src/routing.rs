//! Bidirectional mapping between search state and the address bar.

mod codec;
mod query;
mod writer;


pub use codec::{
    FACT_ID_PARAM, PAGE_PARAM, QUERY_PARAM, build_shareable_url, fact_id, fill_absent_filters,
    has_filter_params, parse_page_param, parse_route, record_share_url, to_route_state,
    to_ui_state, window_title, write_route,
};
pub use query::{Location, QueryString};
pub use writer::{History, HistoryMode, MemoryHistory, UrlWriter};
