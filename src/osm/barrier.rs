// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::profile::Profile;
use super::tags::{Tags, TagsExt};
use super::Options;

/// Checks if a node with the given tags blocks the profile's mode.
///
/// Only nodes with a `barrier=*` or a `ford=*` tag can be barriers.
/// Access tags on the node decide first (`locked=yes` always blocks);
/// otherwise only the profile's [absolute barriers](Profile::absolute_barriers) block.
/// With [Options::block_fords], fords block regardless of access tags.
pub(crate) fn is_barrier(profile: &Profile<'_>, options: Options, tags: &Tags) -> bool {
    let barrier = tags.tag("barrier");
    let ford = tags.tag("ford");
    if barrier.is_none() && ford.is_none() {
        return false;
    }

    if options.block_fords && ford.is_some_and(|v| v != "no") {
        return true;
    }

    let access = profile.access_value(tags);
    if access.is_some_and(|v| profile.is_restricted(v, options)) || tags.has_tag("locked", "yes")
    {
        return true;
    }

    if access.is_some_and(|v| profile.is_intended(v)) {
        return false;
    }

    barrier.is_some_and(|v| profile.absolute_barriers.contains(&v))
}
