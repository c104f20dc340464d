use crate::models::analytics::{CategoryAllocation, SubcategoryAllocation};
use crate::models::asset::{Asset, AssetCategory};

/// Groups a (context-filtered) ledger into the category/subcategory
/// allocation tree.
///
/// Categories come from the fixed `AssetCategory` set; subcategories are the
/// free-text labels found on the assets. Groups with no members are omitted
/// entirely — no zero-rows. Both levels are sorted descending by value.
pub struct AllocationService;

impl AllocationService {
    pub fn new() -> Self {
        Self
    }

    /// Build the allocation breakdown of `assets` against a normalizing
    /// `total` value.
    ///
    /// Subcategory percentages are shares of the grand total, not of the
    /// category subtotal. A `total` of 0 yields 0 for every percentage
    /// field — never NaN or infinity.
    #[must_use]
    pub fn group(&self, assets: &[&Asset], total: f64) -> Vec<CategoryAllocation> {
        let mut groups = Vec::new();

        for category in AssetCategory::ALL {
            let members: Vec<&Asset> = assets
                .iter()
                .copied()
                .filter(|a| a.category == category)
                .collect();
            if members.is_empty() {
                continue;
            }

            let value: f64 = members.iter().map(|a| a.value).sum();

            // Group members by subcategory label, preserving first-seen
            // order until the final sort.
            let mut sub_groups: Vec<(String, Vec<&Asset>)> = Vec::new();
            for asset in members.iter().copied() {
                if let Some((_, bucket)) = sub_groups
                    .iter_mut()
                    .find(|(name, _)| name == &asset.subcategory)
                {
                    bucket.push(asset);
                } else {
                    sub_groups.push((asset.subcategory.clone(), vec![asset]));
                }
            }

            let mut subcategories: Vec<SubcategoryAllocation> = sub_groups
                .into_iter()
                .map(|(name, bucket)| {
                    let sub_value: f64 = bucket.iter().map(|a| a.value).sum();
                    SubcategoryAllocation {
                        name,
                        value: sub_value,
                        percentage: share_pct(sub_value, total),
                        assets: bucket.into_iter().cloned().collect(),
                    }
                })
                .collect();

            subcategories.sort_by(|a, b| {
                b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal)
            });

            groups.push(CategoryAllocation {
                category,
                value,
                percentage: share_pct(value, total),
                subcategories,
            });
        }

        groups.sort_by(|a, b| {
            b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal)
        });

        groups
    }
}

impl Default for AllocationService {
    fn default() -> Self {
        Self::new()
    }
}

/// Percentage share with the zero-total guard.
fn share_pct(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        value / total * 100.0
    } else {
        0.0
    }
}
