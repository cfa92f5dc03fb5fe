// Copyright (C) 2022-present The NetGauze Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or
// implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! [`PathAttribute`] and the values it can carry inside
//! [`crate::update::BgpUpdateMessage`].
//!
//! The codec is permissive about attribute semantics: flag combinations, the
//! ORIGIN value, and the content of AS_PATH or NEXT_HOP are not validated.
//! Those checks belong to whoever consumes the decoded UPDATE.

use crate::{
    community::Community,
    iana::{AsPathSegmentType, OriginType, PathAttributeType, UndefinedOriginType},
};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Path Attribute
///
/// ```text
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |  Attr. Flags  |Attr. Type Code| Path value (variable)
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// Only the optional, transitive and partial bits are stored. The extended
/// length bit is derived from the encoded value when writing, see
/// [`PathAttribute::extended_length`].
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PathAttribute {
    optional: bool,
    transitive: bool,
    partial: bool,
    value: PathAttributeValue,
}

impl PathAttribute {
    pub const fn new(
        optional: bool,
        transitive: bool,
        partial: bool,
        value: PathAttributeValue,
    ) -> Self {
        Self {
            optional,
            transitive,
            partial,
            value,
        }
    }

    /// Attribute with the flags RFC4271 and RFC1997 prescribe for its type.
    /// Unknown attributes default to optional transitive.
    pub fn with_default_flags(value: PathAttributeValue) -> Self {
        let (optional, transitive) = match &value {
            PathAttributeValue::Origin(_)
            | PathAttributeValue::AsPath(_)
            | PathAttributeValue::NextHop(_)
            | PathAttributeValue::LocalPreference(_)
            | PathAttributeValue::AtomicAggregate(_) => (false, true),
            PathAttributeValue::MultiExitDiscriminator(_) => (true, false),
            PathAttributeValue::Aggregator(_)
            | PathAttributeValue::Communities(_)
            | PathAttributeValue::UnknownAttribute(_) => (true, true),
        };
        Self::new(optional, transitive, false, value)
    }

    /// Optional bit defines whether the attribute is optional (if set to
    /// `true`) or well-known (if set to `false`).
    pub const fn optional(&self) -> bool {
        self.optional
    }

    pub const fn transitive(&self) -> bool {
        self.transitive
    }

    /// Information in an optional transitive attribute is incomplete
    pub const fn partial(&self) -> bool {
        self.partial
    }

    pub const fn value(&self) -> &PathAttributeValue {
        &self.value
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PathAttributeValue {
    Origin(Origin),
    AsPath(AsPath),
    NextHop(NextHop),
    MultiExitDiscriminator(MultiExitDiscriminator),
    LocalPreference(LocalPreference),
    AtomicAggregate(AtomicAggregate),
    Aggregator(Aggregator),
    Communities(Communities),
    UnknownAttribute(UnknownAttribute),
}

impl PathAttributeValue {
    /// Attribute type, or the raw code when the attribute is unknown
    pub const fn attribute_type(&self) -> Result<PathAttributeType, u8> {
        match self {
            Self::Origin(_) => Ok(PathAttributeType::Origin),
            Self::AsPath(_) => Ok(PathAttributeType::AsPath),
            Self::NextHop(_) => Ok(PathAttributeType::NextHop),
            Self::MultiExitDiscriminator(_) => Ok(PathAttributeType::MultiExitDiscriminator),
            Self::LocalPreference(_) => Ok(PathAttributeType::LocalPreference),
            Self::AtomicAggregate(_) => Ok(PathAttributeType::AtomicAggregate),
            Self::Aggregator(_) => Ok(PathAttributeType::Aggregator),
            Self::Communities(_) => Ok(PathAttributeType::Communities),
            Self::UnknownAttribute(unknown) => Err(unknown.code),
        }
    }

    pub fn raw_code(&self) -> u8 {
        match self.attribute_type() {
            Ok(code) => code.into(),
            Err(code) => code,
        }
    }
}

/// ORIGIN attribute. The value is kept as received, including values outside
/// the three defined by [`OriginType`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    value: u8,
}

impl Origin {
    pub const fn new(value: u8) -> Self {
        Self { value }
    }

    pub const fn value(&self) -> u8 {
        self.value
    }

    pub fn origin_type(&self) -> Result<OriginType, UndefinedOriginType> {
        OriginType::try_from(self.value)
    }
}

impl From<OriginType> for Origin {
    fn from(origin: OriginType) -> Self {
        Self::new(origin.into())
    }
}

/// AS_PATH with 4-octet AS numbers
/// [RFC6793](https://datatracker.ietf.org/doc/html/rfc6793#section-3)
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct AsPath {
    segments: Vec<AsPathSegment>,
}

impl AsPath {
    pub const fn new(segments: Vec<AsPathSegment>) -> Self {
        Self { segments }
    }

    pub const fn segments(&self) -> &Vec<AsPathSegment> {
        &self.segments
    }
}

/// One segment of an [`AsPath`]
///
/// ```text
/// +-----------------------------------+
/// | path segment type (1 octet)       |
/// +-----------------------------------+
/// | path segment length (1 octet)     |
/// +-----------------------------------+
/// | path segment value (4 octets * N) |
/// +-----------------------------------+
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct AsPathSegment {
    segment_type: AsPathSegmentType,
    as_numbers: Vec<u32>,
}

impl AsPathSegment {
    pub const fn new(segment_type: AsPathSegmentType, as_numbers: Vec<u32>) -> Self {
        Self {
            segment_type,
            as_numbers,
        }
    }

    pub const fn segment_type(&self) -> AsPathSegmentType {
        self.segment_type
    }

    pub const fn as_numbers(&self) -> &Vec<u32> {
        &self.as_numbers
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct NextHop {
    next_hop: Ipv4Addr,
}

impl NextHop {
    pub const fn new(next_hop: Ipv4Addr) -> Self {
        Self { next_hop }
    }

    pub const fn next_hop(&self) -> Ipv4Addr {
        self.next_hop
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct MultiExitDiscriminator {
    metric: u32,
}

impl MultiExitDiscriminator {
    pub const fn new(metric: u32) -> Self {
        Self { metric }
    }

    pub const fn metric(&self) -> u32 {
        self.metric
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct LocalPreference {
    metric: u32,
}

impl LocalPreference {
    pub const fn new(metric: u32) -> Self {
        Self { metric }
    }

    pub const fn metric(&self) -> u32 {
        self.metric
    }
}

/// Zero length attribute
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct AtomicAggregate;

/// AGGREGATOR in its 4-octet ASN form
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Aggregator {
    asn: u32,
    origin: Ipv4Addr,
}

impl Aggregator {
    pub const fn new(asn: u32, origin: Ipv4Addr) -> Self {
        Self { asn, origin }
    }

    pub const fn asn(&self) -> u32 {
        self.asn
    }

    pub const fn origin(&self) -> Ipv4Addr {
        self.origin
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Communities {
    communities: Vec<Community>,
}

impl Communities {
    pub const fn new(communities: Vec<Community>) -> Self {
        Self { communities }
    }

    pub const fn communities(&self) -> &Vec<Community> {
        &self.communities
    }
}

/// Attribute with a type code this crate doesn't model. The value is kept
/// verbatim so the attribute can be forwarded. Of its flags only the
/// optional, transitive and partial bits survive a decode; the four low
/// (unused) bits are written back as zero.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct UnknownAttribute {
    code: u8,
    value: Vec<u8>,
}

impl UnknownAttribute {
    /// `code` must not be one of [`PathAttributeType`], writing such an
    /// attribute fails with `PathAttributeWritingError::KnownAttributeCode`
    pub const fn new(code: u8, value: Vec<u8>) -> Self {
        Self { code, value }
    }

    pub const fn code(&self) -> u8 {
        self.code
    }

    pub const fn value(&self) -> &Vec<u8> {
        &self.value
    }
}
