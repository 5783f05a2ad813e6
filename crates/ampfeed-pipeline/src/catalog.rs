//! Built-in advertiser schema catalog
//!
//! The advertisers onboarded today, as plain configuration values. Each
//! entry records the partner's raw header vocabulary, the column holding
//! the product URL, the campaign-specific tracking base, and the identifier
//! columns that arrive float-mangled from upstream exports.

use crate::link::TrackingTemplate;
use crate::schema::{Delimiter, SourceSchema};

/// Advertiser names with a built-in schema
pub const BUILTIN_ADVERTISERS: &[&str] =
    &["wayfair", "zappos", "bloomingdales", "verizon", "newbalance"];

/// Look up a built-in schema by advertiser name (case-insensitive)
pub fn builtin(name: &str) -> Option<SourceSchema> {
    match name.to_lowercase().as_str() {
        "wayfair" => Some(wayfair()),
        "zappos" => Some(zappos()),
        "bloomingdales" => Some(bloomingdales()),
        "verizon" => Some(verizon()),
        "newbalance" => Some(new_balance()),
        _ => None,
    }
}

/// Tracking base for a Klarna shopping-ads campaign
fn klarna_tracking(ctaid: u32) -> TrackingTemplate {
    TrackingTemplate::new(format!(
        "https://klarnashoppingads.ampxdirect.com/?partner=klarnashoppingads&sub1=shoppingads&ctaid={}&v=1.3&source=als_tiles&match-method=deterministic",
        ctaid
    ))
}

/// Wayfair full-catalog export (comma-separated, Google-feed vocabulary)
pub fn wayfair() -> SourceSchema {
    SourceSchema::new("wayfair", "link", klarna_tracking(74894))
        .with_mapping(&[
            ("id", "SKU/id"),
            ("item_group_id", "GroupId"),
            ("title", "Name"),
            ("brand", "Manufacturer"),
            ("link", "URL"),
            ("price", "Price"),
            ("sale_price", "Sale Price"),
            ("description", "Description"),
            ("image_link", "Image URL"),
            ("mpn", "Manufacturer SKU / MPN"),
            ("gtin", "EAN/GTIN"),
            ("availability", "Stock status"),
            ("condition", "Condition"),
            ("product_type", "Category"),
            ("google_product_category", "Shipping costs"),
            ("gender", "Gender"),
            ("age_group", "AgeGroup"),
            ("color", "Color"),
            ("size", "Size"),
            ("material", "Material"),
            ("pattern", "Pattern"),
            ("multipack", "Multipack"),
        ])
        .with_id_columns(&["SKU/id", "EAN/GTIN"])
}

/// Zappos catalog drop (tab-separated `.txt.gz`)
pub fn zappos() -> SourceSchema {
    SourceSchema::new("zappos", "link", klarna_tracking(75101))
        .with_delimiter(Delimiter::Tab)
        .with_mapping(&[
            ("sku", "SKU/id"),
            ("title", "Name"),
            ("description", "Description"),
            ("google_product_category", "Category"),
            ("link", "URL"),
            ("image_link", "Image URL"),
            ("condition", "Condition"),
            ("availability", "Stock status"),
            ("price", "Price"),
            ("brand", "Manufacturer"),
            ("gtin", "EAN/GTIN"),
            ("mpn", "Manufacturer SKU / MPN"),
            ("gender", "Gender"),
            ("age_group", "AgeGroup"),
            ("color", "Color"),
            ("size", "Size"),
            ("item_group_id", "GroupId"),
            ("material", "Material"),
            ("pattern", "Pattern"),
            ("shipping", "Shipping costs"),
        ])
        .with_id_columns(&["SKU/id", "EAN/GTIN"])
}

/// Bloomingdales PLA export (capitalized raw headers)
pub fn bloomingdales() -> SourceSchema {
    SourceSchema::new("bloomingdales", "Link", klarna_tracking(74022))
        .with_mapping(&[
            ("ID", "SKU/id"),
            ("Title", "Name"),
            ("Description", "Description"),
            ("Link", "URL"),
            ("Image Link", "Image URL"),
            ("Condition", "Condition"),
            ("Availability", "Stock status"),
            ("Price", "Price"),
            ("Brand", "Manufacturer"),
            ("GTIN", "EAN/GTIN"),
            ("MPN", "Manufacturer SKU / MPN"),
            ("Gender", "Gender"),
            ("Age Group", "AgeGroup"),
            ("Color", "Color"),
            ("Size", "Size"),
            ("Google Product Category", "Category"),
            ("Sale Price", "Sale Price"),
            ("Sale Price Effective Date", "Sale Price Effective Date"),
            ("Expiration Date", "Expiration Date"),
            ("Mobile Link", "Mobile Link"),
        ])
        .with_id_columns(&["SKU/id", "EAN/GTIN"])
}

/// Verizon devices feed (static file name, custom-label columns)
pub fn verizon() -> SourceSchema {
    SourceSchema::new("verizon", "link", klarna_tracking(26026))
        .with_mapping(&[
            ("id", "SKU/id"),
            ("title", "Name"),
            ("description", "Description"),
            ("google_product_category", "Category"),
            ("product_type", "Product Type"),
            ("link", "URL"),
            ("image_link", "Image URL"),
            ("condition", "Condition"),
            ("availability", "Stock status"),
            ("price", "Price"),
            ("brand", "Manufacturer"),
            ("gtin", "EAN/GTIN"),
            ("mpn", "Manufacturer SKU / MPN"),
            ("color", "Color"),
            ("size", "Size"),
            ("shipping", "Shipping costs"),
            ("custom_label_0", "Custom Label 0"),
            ("custom_label_1", "Custom Label 1"),
            ("custom_label_2", "Custom Label 2"),
            ("custom_label_3", "Custom Label 3"),
            ("custom_label_4", "Custom Label 4"),
            ("short_title", "Short Title"),
            ("gender", "Gender"),
            ("age_group", "AgeGroup"),
            ("installment", "Installment"),
            ("availability_date", "Availability Date"),
        ])
        .with_id_columns(&["SKU/id", "EAN/GTIN"])
}

/// New Balance PLA export
pub fn new_balance() -> SourceSchema {
    SourceSchema::new("newbalance", "Link", klarna_tracking(75063))
        .with_mapping(&[
            ("GTIN", "EAN/GTIN"),
            ("MPN", "Manufacturer SKU / MPN"),
            ("ID", "SKU/id"),
            ("Link", "URL"),
            ("Title", "Name"),
            ("Description", "Description"),
            ("Image Link", "Image URL"),
            ("Price", "Price"),
            ("Condition", "Condition"),
            ("Availability", "Stock status"),
            ("Brand", "Manufacturer"),
            ("Google Product Category", "Category"),
            ("Top Performing Product", "Bundled"),
            ("Color", "Color"),
            ("Size", "Size"),
            ("Gender", "Gender"),
            ("Age Group", "AgeGroup"),
            ("Sale Price", "Sale Price"),
            ("Sale Price Effective Date", "Sale Price Effective Date"),
            ("Expiration Date", "Expiration Date"),
        ])
        .with_id_columns(&["SKU/id", "EAN/GTIN"])
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        for name in BUILTIN_ADVERTISERS {
            let schema = builtin(name).unwrap();
            assert_eq!(&schema.advertiser, name);
        }
        assert!(builtin("Wayfair").is_some());
        assert!(builtin("unknown").is_none());
    }

    #[test]
    fn test_url_column_is_mapped_to_url() {
        // Every built-in schema maps its URL-bearing column to "URL"
        for name in BUILTIN_ADVERTISERS {
            let schema = builtin(name).unwrap();
            assert_eq!(
                schema.rename(&schema.url_column),
                Some("URL"),
                "{} url column not mapped",
                name
            );
        }
    }

    #[test]
    fn test_zappos_is_tab_separated() {
        assert_eq!(zappos().delimiter, Delimiter::Tab);
        assert_eq!(wayfair().delimiter, Delimiter::Comma);
    }

    #[test]
    fn test_tracking_bases_are_per_campaign() {
        assert!(wayfair().tracking.base().contains("ctaid=74894"));
        assert!(zappos().tracking.base().contains("ctaid=75101"));
        assert!(bloomingdales().tracking.base().contains("ctaid=74022"));
    }
}
