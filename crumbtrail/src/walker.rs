//! Ancestry walking.
//!
//! Climbs from an item to the root of its membership hierarchy one parent
//! at a time. The walk is iterative and remembers every item it has
//! visited, so reference cycles end the walk instead of looping.

use std::collections::{HashSet, VecDeque};

use crate::error::Result;
use crate::item::{ContentItem, ItemId};
use crate::resolver::ReferenceResolver;

/// Result of a walk: root first, ending with the starting item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AncestryChain {
    /// Items from the topmost ancestor reached down to the start item.
    pub items: Vec<ContentItem>,
    /// The walk stopped at the depth limit while the top item still had a
    /// parent.
    pub truncated: bool,
}

impl AncestryChain {
    fn single(item: &ContentItem) -> Self {
        Self {
            items: vec![item.clone()],
            truncated: false,
        }
    }

    /// Number of items in the chain, the start item included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the chain holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ancestors of the start item, root first.
    #[must_use]
    pub fn ancestors(&self) -> &[ContentItem] {
        match self.items.split_last() {
            Some((_, ancestors)) => ancestors,
            None => &[],
        }
    }
}

/// Walks ancestry chains through a [`ReferenceResolver`].
pub struct AncestryWalker<'r, 'a> {
    resolver: &'r ReferenceResolver<'a>,
}

impl<'r, 'a> AncestryWalker<'r, 'a> {
    /// Creates a walker.
    #[must_use]
    pub fn new(resolver: &'r ReferenceResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Walks the membership chain, falling back to the part-of chain when
    /// membership yields no ancestors and the fallback yields more.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn walk(&self, item: &ContentItem) -> Result<AncestryChain> {
        let membership = self.walk_membership(item)?;
        if membership.len() >= 2 {
            return Ok(membership);
        }

        let part_of = self.walk_part_of(item)?;
        if part_of.len() > membership.len() {
            log::debug!("{} placed through its part-of parent", item.id);
            Ok(part_of)
        } else {
            Ok(membership)
        }
    }

    /// Follows the ancestry field from `item` upwards.
    ///
    /// Without an ancestry field the chain is just `item`.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn walk_membership(&self, item: &ContentItem) -> Result<AncestryChain> {
        let settings = self.resolver.settings();
        let Some(ref field) = settings.ancestry_field else {
            return Ok(AncestryChain::single(item));
        };

        let mut visited = HashSet::new();
        let (items, truncated) =
            self.climb(item.clone(), field, &mut visited, settings.max_depth)?;
        Ok(AncestryChain {
            items: items.into(),
            truncated,
        })
    }

    /// Steps to the part-of parent, then follows the ancestry field from
    /// there. The chain still ends with `item`.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn walk_part_of(&self, item: &ContentItem) -> Result<AncestryChain> {
        let settings = self.resolver.settings();
        let (Some(part_of), Some(ancestry)) =
            (&settings.part_of_field, &settings.ancestry_field)
        else {
            return Ok(AncestryChain::single(item));
        };

        let Some(parent) = self.resolver.parent_via(item, part_of)? else {
            return Ok(AncestryChain::single(item));
        };
        if parent.id == item.id {
            return Ok(AncestryChain::single(item));
        }

        if settings.max_depth == 1 {
            return Ok(AncestryChain {
                items: vec![item.clone()],
                truncated: true,
            });
        }

        let mut visited = HashSet::from([item.id]);
        let budget = settings.max_depth.saturating_sub(1);
        let (mut items, truncated) = self.climb(parent, ancestry, &mut visited, budget)?;
        items.push_back(item.clone());
        Ok(AncestryChain {
            items: items.into(),
            truncated,
        })
    }

    /// Prepends items until the root, a revisit or the depth budget
    /// (0 for unlimited) stops the climb.
    fn climb(
        &self,
        start: ContentItem,
        field: &str,
        visited: &mut HashSet<ItemId>,
        budget: usize,
    ) -> Result<(VecDeque<ContentItem>, bool)> {
        let mut chain = VecDeque::new();
        let mut current = Some(start);

        while let Some(item) = current.take() {
            if !visited.insert(item.id) {
                log::debug!("reference cycle at {}, stopping walk", item.id);
                break;
            }

            let parent = self.resolver.parent_via(&item, field)?;
            log::debug!("{field} step at {}", item.id);
            chain.push_front(item);

            if budget > 0 && chain.len() >= budget {
                let truncated = parent.is_some_and(|p| !visited.contains(&p.id));
                if truncated {
                    log::debug!("depth limit {budget} reached, trail truncated");
                }
                return Ok((chain, truncated));
            }
            current = parent;
        }

        Ok((chain, false))
    }
}
