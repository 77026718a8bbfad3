use crate::models::FactRecord;
use crate::overlay::DeepLinkResolver;
use crate::routing::{History, UrlWriter, fact_id};

use super::FactIndex;

impl FactIndex {
    #[must_use]
    pub fn deep_link_resolver(&self) -> DeepLinkResolver {
        DeepLinkResolver::new(self.is_enabled())
    }

    /// Brings the overlay in line with the URL's `factId`. A deep link that
    /// arrived without filters gets the record's facets written into the URL
    /// once.
    pub fn sync_overlay<H: History>(
        &self,
        resolver: &mut DeepLinkResolver,
        writer: &mut UrlWriter<H>,
    ) -> Option<FactRecord> {
        let location = writer.location();
        let record = match &self.backend {
            Some(backend) => resolver
                .resolve(fact_id(&location.search), backend.as_ref())
                .cloned(),
            None => {
                resolver.observe(fact_id(&location.search));
                None
            }
        }?;
        if let Some(fallback) = resolver.take_fallback_record() {
            writer.apply_fallback_filters(fallback);
        }
        Some(record)
    }

    /// Closes the overlay and drops `factId` from the URL.
    pub fn close_overlay<H: History>(
        &self,
        resolver: &mut DeepLinkResolver,
        writer: &mut UrlWriter<H>,
    ) {
        resolver.close();
        writer.close_overlay();
    }
}
