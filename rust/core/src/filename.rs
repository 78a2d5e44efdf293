// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Asset filename grammar using nom
//!
//! ```text
//! ShinjukuTerminal_<level>[out]_<Category>.geojson
//! level    := ["B"] digit+
//! Category := "Space" | "Floor" | "Fixture"
//! ```
//!
//! A `B` prefix marks a basement and yields a negative floor index. The `out`
//! suffix marks the outdoor part of a level and maps to the same floor index.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1},
    combinator::{eof, map, map_res, opt, value},
    sequence::{pair, tuple},
    IResult,
};

use crate::floor::{AssetCategory, FloorIndex};

/// Fixed dataset prefix shared by every asset file
pub const ASSET_PREFIX: &str = "ShinjukuTerminal_";

/// Information carried by an asset filename
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetName {
    pub floor: FloorIndex,
    pub category: AssetCategory,
    /// `out` variant of the level
    pub outdoor: bool,
}

impl AssetName {
    /// Parse the last `/`-separated segment of a location string
    pub fn from_location(location: &str) -> Option<Self> {
        let name = location.rsplit(['/', '\\']).next().unwrap_or(location);
        // Drop query strings from URLs
        let name = name.split(['?', '#']).next().unwrap_or(name);
        parse_asset_filename(name)
    }
}

/// Parse level token: `2` or `B1`
fn level_token(input: &str) -> IResult<&str, FloorIndex> {
    map_res(
        pair(opt(char('B')), digit1),
        |(basement, digits): (Option<char>, &str)| {
            digits.parse::<i32>().map(|n| {
                if basement.is_some() {
                    FloorIndex::new(-n)
                } else {
                    FloorIndex::new(n)
                }
            })
        },
    )(input)
}

fn category(input: &str) -> IResult<&str, AssetCategory> {
    alt((
        value(AssetCategory::Space, tag("Space")),
        value(AssetCategory::Floor, tag("Floor")),
        value(AssetCategory::Fixture, tag("Fixture")),
    ))(input)
}

fn asset_filename(input: &str) -> IResult<&str, AssetName> {
    map(
        tuple((
            tag(ASSET_PREFIX),
            level_token,
            opt(tag("out")),
            char('_'),
            category,
            tag(".geojson"),
            eof,
        )),
        |(_, floor, out, _, category, _, _)| AssetName {
            floor,
            category,
            outdoor: out.is_some(),
        },
    )(input)
}

/// Parse a bare filename. Returns `None` when the name does not follow the
/// convention; such files are not loaded.
pub fn parse_asset_filename(name: &str) -> Option<AssetName> {
    asset_filename(name).ok().map(|(_, asset)| asset)
}
