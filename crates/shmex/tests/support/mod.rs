// @generated by shmex-gen from schema module `bench`. Do not edit.
#![allow(clippy::all)]
#![allow(dead_code)]

use shmex::frame::{self, VarCheck, VarRegion};
use shmex::proxy::{self, ShmType};
use shmex::schema::{
    FieldLayout, FieldType, PrimitiveKind, SchemaModule, TypeDescriptor, TypeEntry,
};
use shmex::view;

/// Schema enum `EvictionPolicy` (u32 on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum EvictionPolicy {
    #[default]
    Lru = 0,
    Mru = 1,
    Random = 2,
}

impl EvictionPolicy {
    pub const VARIANT_COUNT: u32 = 3;

    #[must_use]
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Lru),
            1 => Some(Self::Mru),
            2 => Some(Self::Random),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

/// Schema struct `Point` (hash 0x7c31a9f2645d0e8b).
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Default for Point {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
        }
    }
}

/// Zero-copy read view over a `Point` payload.
#[derive(Clone, Copy)]
pub struct PointProxy<'a> {
    payload: &'a [u8],
    base: usize,
    var_base: usize,
}

impl<'a> PointProxy<'a> {
    #[must_use]
    pub fn x(&self) -> f64 {
        view::get_f64(self.payload, self.base + 0)
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        view::get_f64(self.payload, self.base + 8)
    }
}

/// In-place write view over a `Point` fixed region. Strings
/// cannot be resized through it.
pub struct PointProxyMut<'a> {
    payload: &'a mut [u8],
    base: usize,
}

impl<'a> PointProxyMut<'a> {
    pub fn set_x(&mut self, value: f64) {
        view::put_f64(self.payload, self.base + 0, value);
    }

    pub fn set_y(&mut self, value: f64) {
        view::put_f64(self.payload, self.base + 8, value);
    }
}

static POINT_FIELDS: [FieldLayout; 2] = [
    FieldLayout {
        name: "x",
        offset_bytes: 0,
        field_type: FieldType::Primitive(PrimitiveKind::F64),
        size_bytes: 8,
        alignment: 8,
        is_primary_key: false,
        array_len: 0,
        element_type: None,
    },
    FieldLayout {
        name: "y",
        offset_bytes: 8,
        field_type: FieldType::Primitive(PrimitiveKind::F64),
        size_bytes: 8,
        alignment: 8,
        is_primary_key: false,
        array_len: 0,
        element_type: None,
    },
];

static POINT_DESC: TypeDescriptor = TypeDescriptor {
    type_name: "bench::Point",
    type_hash: 0x7c31a9f2645d0e8b,
    type_index: 0,
    fixed_size: 16,
    alignment: 8,
    has_variable_data: false,
    fields: &POINT_FIELDS,
};

impl Point {
    fn write_fields(&self, buf: &mut Vec<u8>, base: usize, region: &VarRegion) {
        view::put_f64(buf, base + 0, self.x);
        view::put_f64(buf, base + 8, self.y);
        let _ = region;
    }

    fn verify_fields(
        payload: &[u8],
        base: usize,
        var_base: usize,
        check: &mut VarCheck,
    ) -> frame::Result<()> {
        let _ = (payload, base, var_base, check);
        Ok(())
    }

    fn read_fields(payload: &[u8], base: usize, var_base: usize) -> Self {
        let _ = var_base;
        Self {
            x: view::get_f64(payload, base + 0),
            y: view::get_f64(payload, base + 8),
        }
    }

    /// Compare only the primary-key fields against a proxy.
    #[must_use]
    pub fn primary_key_matches(&self, other: &PointProxy<'_>) -> bool {
        let _ = other;
        true
    }

    /// Full field-by-field comparison against a proxy.
    #[must_use]
    pub fn eq_proxy(&self, other: &PointProxy<'_>) -> bool {
        self.x == other.x()
            && self.y == other.y()
    }
}

impl ShmType for Point {
    const TYPE_HASH: u64 = 0x7c31a9f2645d0e8b;
    const FIXED_SIZE: usize = 16;
    const ALIGNMENT: usize = 8;
    const HAS_VARIABLE_DATA: bool = false;

    type Proxy<'a> = PointProxy<'a>;
    type ProxyMut<'a> = PointProxyMut<'a>;

    fn descriptor() -> &'static TypeDescriptor {
        &POINT_DESC
    }

    fn var_data_size(&self) -> usize {
        0
    }

    fn serialize(&self) -> Vec<u8> {
        let mut buf = vec![0u8; Self::FIXED_SIZE];
        let region = VarRegion::new(&buf);
        self.write_fields(&mut buf, 0, &region);
        buf
    }

    fn verify(payload: &[u8]) -> frame::Result<()> {
        proxy::verify_fixed_len(payload, Self::FIXED_SIZE)?;
        let mut check = VarCheck::new(payload.len() - Self::FIXED_SIZE);
        Self::verify_fields(payload, 0, Self::FIXED_SIZE, &mut check)?;
        check.finish()
    }

    fn proxy(payload: &[u8]) -> PointProxy<'_> {
        PointProxy {
            payload,
            base: 0,
            var_base: Self::FIXED_SIZE,
        }
    }

    fn proxy_mut(payload: &mut [u8]) -> PointProxyMut<'_> {
        PointProxyMut { payload, base: 0 }
    }

    fn from_payload(payload: &[u8]) -> frame::Result<Self> {
        Self::verify(payload)?;
        Ok(Self::read_fields(payload, 0, Self::FIXED_SIZE))
    }
}

fn verify_point(payload: &[u8]) -> frame::Result<()> {
    <Point as ShmType>::verify(payload)
}

/// Schema struct `CacheConfig` (hash 0xd94f1b6e82a35c07).
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    pub cache_size: u32,
    pub eviction_policy: EvictionPolicy,
    pub label: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_size: 0,
            eviction_policy: EvictionPolicy::default(),
            label: String::new(),
        }
    }
}

/// Zero-copy read view over a `CacheConfig` payload.
#[derive(Clone, Copy)]
pub struct CacheConfigProxy<'a> {
    payload: &'a [u8],
    base: usize,
    var_base: usize,
}

impl<'a> CacheConfigProxy<'a> {
    #[must_use]
    pub fn cache_size(&self) -> u32 {
        view::get_u32(self.payload, self.base + 0)
    }

    #[must_use]
    pub fn eviction_policy(&self) -> EvictionPolicy {
        EvictionPolicy::from_u32(view::get_u32(self.payload, self.base + 4))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn label(&self) -> &'a str {
        view::get_str(self.payload, self.base + 8, self.var_base)
    }
}

/// In-place write view over a `CacheConfig` fixed region. Strings
/// cannot be resized through it.
pub struct CacheConfigProxyMut<'a> {
    payload: &'a mut [u8],
    base: usize,
}

impl<'a> CacheConfigProxyMut<'a> {
    pub fn set_cache_size(&mut self, value: u32) {
        view::put_u32(self.payload, self.base + 0, value);
    }

    pub fn set_eviction_policy(&mut self, value: EvictionPolicy) {
        view::put_u32(self.payload, self.base + 4, value.as_u32());
    }
}

static CACHE_CONFIG_FIELDS: [FieldLayout; 3] = [
    FieldLayout {
        name: "cache_size",
        offset_bytes: 0,
        field_type: FieldType::Primitive(PrimitiveKind::U32),
        size_bytes: 4,
        alignment: 4,
        is_primary_key: true,
        array_len: 0,
        element_type: None,
    },
    FieldLayout {
        name: "eviction_policy",
        offset_bytes: 4,
        field_type: FieldType::Enum,
        size_bytes: 4,
        alignment: 4,
        is_primary_key: false,
        array_len: 0,
        element_type: None,
    },
    FieldLayout {
        name: "label",
        offset_bytes: 8,
        field_type: FieldType::String,
        size_bytes: 16,
        alignment: 8,
        is_primary_key: false,
        array_len: 0,
        element_type: None,
    },
];

static CACHE_CONFIG_DESC: TypeDescriptor = TypeDescriptor {
    type_name: "bench::CacheConfig",
    type_hash: 0xd94f1b6e82a35c07,
    type_index: 1,
    fixed_size: 24,
    alignment: 8,
    has_variable_data: true,
    fields: &CACHE_CONFIG_FIELDS,
};

impl CacheConfig {
    fn write_fields(&self, buf: &mut Vec<u8>, base: usize, region: &VarRegion) {
        view::put_u32(buf, base + 0, self.cache_size);
        view::put_u32(buf, base + 4, self.eviction_policy.as_u32());
        let (off, len) = region.append(buf, self.label.as_bytes());
        view::put_var_slot(buf, base + 8, off, len);
    }

    fn verify_fields(
        payload: &[u8],
        base: usize,
        var_base: usize,
        check: &mut VarCheck,
    ) -> frame::Result<()> {
        proxy::verify_enum(payload, base + 4, 3, "eviction_policy")?;
        let (off, len) = view::get_var_slot(payload, base + 8);
        check.slot("label", off, len)?;
        proxy::verify_utf8(payload, base + 8, var_base, "label")?;
        Ok(())
    }

    fn read_fields(payload: &[u8], base: usize, var_base: usize) -> Self {
        Self {
            cache_size: view::get_u32(payload, base + 0),
            eviction_policy: EvictionPolicy::from_u32(view::get_u32(payload, base + 4))
                .unwrap_or_default(),
            label: view::get_str(payload, base + 8, var_base).to_string(),
        }
    }

    /// Compare only the primary-key fields against a proxy.
    #[must_use]
    pub fn primary_key_matches(&self, other: &CacheConfigProxy<'_>) -> bool {
        self.cache_size == other.cache_size()
    }

    /// Full field-by-field comparison against a proxy.
    #[must_use]
    pub fn eq_proxy(&self, other: &CacheConfigProxy<'_>) -> bool {
        self.cache_size == other.cache_size()
            && self.eviction_policy == other.eviction_policy()
            && self.label == other.label()
    }
}

impl ShmType for CacheConfig {
    const TYPE_HASH: u64 = 0xd94f1b6e82a35c07;
    const FIXED_SIZE: usize = 24;
    const ALIGNMENT: usize = 8;
    const HAS_VARIABLE_DATA: bool = true;

    type Proxy<'a> = CacheConfigProxy<'a>;
    type ProxyMut<'a> = CacheConfigProxyMut<'a>;

    fn descriptor() -> &'static TypeDescriptor {
        &CACHE_CONFIG_DESC
    }

    fn var_data_size(&self) -> usize {
        self.label.len()
    }

    fn serialize(&self) -> Vec<u8> {
        let mut buf = vec![0u8; Self::FIXED_SIZE];
        let region = VarRegion::new(&buf);
        self.write_fields(&mut buf, 0, &region);
        buf
    }

    fn verify(payload: &[u8]) -> frame::Result<()> {
        proxy::verify_fixed_len(payload, Self::FIXED_SIZE)?;
        let mut check = VarCheck::new(payload.len() - Self::FIXED_SIZE);
        Self::verify_fields(payload, 0, Self::FIXED_SIZE, &mut check)?;
        check.finish()
    }

    fn proxy(payload: &[u8]) -> CacheConfigProxy<'_> {
        CacheConfigProxy {
            payload,
            base: 0,
            var_base: Self::FIXED_SIZE,
        }
    }

    fn proxy_mut(payload: &mut [u8]) -> CacheConfigProxyMut<'_> {
        CacheConfigProxyMut { payload, base: 0 }
    }

    fn from_payload(payload: &[u8]) -> frame::Result<Self> {
        Self::verify(payload)?;
        Ok(Self::read_fields(payload, 0, Self::FIXED_SIZE))
    }
}

fn verify_cache_config(payload: &[u8]) -> frame::Result<()> {
    <CacheConfig as ShmType>::verify(payload)
}

/// Schema struct `Sweep` (hash 0x21e8c57a9b04fd63).
#[derive(Debug, Clone, PartialEq)]
pub struct Sweep {
    pub id: u64,
    pub origin: Point,
    pub weights: [f64; 4],
}

impl Default for Sweep {
    fn default() -> Self {
        Self {
            id: 0,
            origin: Point::default(),
            weights: [0.0; 4],
        }
    }
}

/// Zero-copy read view over a `Sweep` payload.
#[derive(Clone, Copy)]
pub struct SweepProxy<'a> {
    payload: &'a [u8],
    base: usize,
    var_base: usize,
}

impl<'a> SweepProxy<'a> {
    #[must_use]
    pub fn id(&self) -> u64 {
        view::get_u64(self.payload, self.base + 0)
    }

    #[must_use]
    pub fn origin(&self) -> PointProxy<'a> {
        PointProxy {
            payload: self.payload,
            base: self.base + 8,
            var_base: self.var_base,
        }
    }

    #[must_use]
    pub fn weights(&self) -> view::ArrayView<'a, f64> {
        view::ArrayView::new(self.payload, self.base + 24, 4)
    }
}

/// In-place write view over a `Sweep` fixed region. Strings
/// cannot be resized through it.
pub struct SweepProxyMut<'a> {
    payload: &'a mut [u8],
    base: usize,
}

impl<'a> SweepProxyMut<'a> {
    pub fn set_id(&mut self, value: u64) {
        view::put_u64(self.payload, self.base + 0, value);
    }

    pub fn origin_mut(&mut self) -> PointProxyMut<'_> {
        PointProxyMut {
            payload: self.payload,
            base: self.base + 8,
        }
    }

    pub fn set_weights(&mut self, values: &[f64]) {
        view::put_array(self.payload, self.base + 24, 4, values);
    }
}

static SWEEP_FIELDS: [FieldLayout; 3] = [
    FieldLayout {
        name: "id",
        offset_bytes: 0,
        field_type: FieldType::Primitive(PrimitiveKind::U64),
        size_bytes: 8,
        alignment: 8,
        is_primary_key: true,
        array_len: 0,
        element_type: None,
    },
    FieldLayout {
        name: "origin",
        offset_bytes: 8,
        field_type: FieldType::Struct,
        size_bytes: 16,
        alignment: 8,
        is_primary_key: false,
        array_len: 0,
        element_type: Some(&POINT_DESC),
    },
    FieldLayout {
        name: "weights",
        offset_bytes: 24,
        field_type: FieldType::Array(PrimitiveKind::F64),
        size_bytes: 32,
        alignment: 8,
        is_primary_key: false,
        array_len: 4,
        element_type: None,
    },
];

static SWEEP_DESC: TypeDescriptor = TypeDescriptor {
    type_name: "bench::Sweep",
    type_hash: 0x21e8c57a9b04fd63,
    type_index: 2,
    fixed_size: 56,
    alignment: 8,
    has_variable_data: false,
    fields: &SWEEP_FIELDS,
};

impl Sweep {
    fn write_fields(&self, buf: &mut Vec<u8>, base: usize, region: &VarRegion) {
        view::put_u64(buf, base + 0, self.id);
        self.origin.write_fields(buf, base + 8, region);
        view::put_array(buf, base + 24, 4, &self.weights);
    }

    fn verify_fields(
        payload: &[u8],
        base: usize,
        var_base: usize,
        check: &mut VarCheck,
    ) -> frame::Result<()> {
        Point::verify_fields(payload, base + 8, var_base, check)?;
        Ok(())
    }

    fn read_fields(payload: &[u8], base: usize, var_base: usize) -> Self {
        Self {
            id: view::get_u64(payload, base + 0),
            origin: Point::read_fields(payload, base + 8, var_base),
            weights: {
                let mut a = [0.0; 4];
                let v = view::ArrayView::<f64>::new(payload, base + 24, 4);
                for (slot, value) in a.iter_mut().zip(v.iter()) {
                    *slot = value;
                }
                a
            },
        }
    }

    /// Compare only the primary-key fields against a proxy.
    #[must_use]
    pub fn primary_key_matches(&self, other: &SweepProxy<'_>) -> bool {
        self.id == other.id()
    }

    /// Full field-by-field comparison against a proxy.
    #[must_use]
    pub fn eq_proxy(&self, other: &SweepProxy<'_>) -> bool {
        self.id == other.id()
            && self.origin.eq_proxy(&other.origin())
            && self.weights.iter().copied().eq(other.weights().iter())
    }
}

impl ShmType for Sweep {
    const TYPE_HASH: u64 = 0x21e8c57a9b04fd63;
    const FIXED_SIZE: usize = 56;
    const ALIGNMENT: usize = 8;
    const HAS_VARIABLE_DATA: bool = false;

    type Proxy<'a> = SweepProxy<'a>;
    type ProxyMut<'a> = SweepProxyMut<'a>;

    fn descriptor() -> &'static TypeDescriptor {
        &SWEEP_DESC
    }

    fn var_data_size(&self) -> usize {
        self.origin.var_data_size()
    }

    fn serialize(&self) -> Vec<u8> {
        let mut buf = vec![0u8; Self::FIXED_SIZE];
        let region = VarRegion::new(&buf);
        self.write_fields(&mut buf, 0, &region);
        buf
    }

    fn verify(payload: &[u8]) -> frame::Result<()> {
        proxy::verify_fixed_len(payload, Self::FIXED_SIZE)?;
        let mut check = VarCheck::new(payload.len() - Self::FIXED_SIZE);
        Self::verify_fields(payload, 0, Self::FIXED_SIZE, &mut check)?;
        check.finish()
    }

    fn proxy(payload: &[u8]) -> SweepProxy<'_> {
        SweepProxy {
            payload,
            base: 0,
            var_base: Self::FIXED_SIZE,
        }
    }

    fn proxy_mut(payload: &mut [u8]) -> SweepProxyMut<'_> {
        SweepProxyMut { payload, base: 0 }
    }

    fn from_payload(payload: &[u8]) -> frame::Result<Self> {
        Self::verify(payload)?;
        Ok(Self::read_fields(payload, 0, Self::FIXED_SIZE))
    }
}

fn verify_sweep(payload: &[u8]) -> frame::Result<()> {
    <Sweep as ShmType>::verify(payload)
}

/// Schema struct `CacheStats` (hash 0xa6503de19c7f24b8).
#[derive(Debug, Clone, PartialEq)]
pub struct CacheStats {
    pub cache_size: u32,
    pub hits: u64,
    pub misses: u64,
}

impl Default for CacheStats {
    fn default() -> Self {
        Self {
            cache_size: 0,
            hits: 0,
            misses: 0,
        }
    }
}

/// Zero-copy read view over a `CacheStats` payload.
#[derive(Clone, Copy)]
pub struct CacheStatsProxy<'a> {
    payload: &'a [u8],
    base: usize,
    var_base: usize,
}

impl<'a> CacheStatsProxy<'a> {
    #[must_use]
    pub fn cache_size(&self) -> u32 {
        view::get_u32(self.payload, self.base + 0)
    }

    #[must_use]
    pub fn hits(&self) -> u64 {
        view::get_u64(self.payload, self.base + 8)
    }

    #[must_use]
    pub fn misses(&self) -> u64 {
        view::get_u64(self.payload, self.base + 16)
    }
}

/// In-place write view over a `CacheStats` fixed region. Strings
/// cannot be resized through it.
pub struct CacheStatsProxyMut<'a> {
    payload: &'a mut [u8],
    base: usize,
}

impl<'a> CacheStatsProxyMut<'a> {
    pub fn set_cache_size(&mut self, value: u32) {
        view::put_u32(self.payload, self.base + 0, value);
    }

    pub fn set_hits(&mut self, value: u64) {
        view::put_u64(self.payload, self.base + 8, value);
    }

    pub fn set_misses(&mut self, value: u64) {
        view::put_u64(self.payload, self.base + 16, value);
    }
}

static CACHE_STATS_FIELDS: [FieldLayout; 3] = [
    FieldLayout {
        name: "cache_size",
        offset_bytes: 0,
        field_type: FieldType::Primitive(PrimitiveKind::U32),
        size_bytes: 4,
        alignment: 4,
        is_primary_key: true,
        array_len: 0,
        element_type: None,
    },
    FieldLayout {
        name: "hits",
        offset_bytes: 8,
        field_type: FieldType::Primitive(PrimitiveKind::U64),
        size_bytes: 8,
        alignment: 8,
        is_primary_key: false,
        array_len: 0,
        element_type: None,
    },
    FieldLayout {
        name: "misses",
        offset_bytes: 16,
        field_type: FieldType::Primitive(PrimitiveKind::U64),
        size_bytes: 8,
        alignment: 8,
        is_primary_key: false,
        array_len: 0,
        element_type: None,
    },
];

static CACHE_STATS_DESC: TypeDescriptor = TypeDescriptor {
    type_name: "bench::CacheStats",
    type_hash: 0xa6503de19c7f24b8,
    type_index: 3,
    fixed_size: 24,
    alignment: 8,
    has_variable_data: false,
    fields: &CACHE_STATS_FIELDS,
};

impl CacheStats {
    fn write_fields(&self, buf: &mut Vec<u8>, base: usize, region: &VarRegion) {
        view::put_u32(buf, base + 0, self.cache_size);
        view::put_u64(buf, base + 8, self.hits);
        view::put_u64(buf, base + 16, self.misses);
        let _ = region;
    }

    fn verify_fields(
        payload: &[u8],
        base: usize,
        var_base: usize,
        check: &mut VarCheck,
    ) -> frame::Result<()> {
        let _ = (payload, base, var_base, check);
        Ok(())
    }

    fn read_fields(payload: &[u8], base: usize, var_base: usize) -> Self {
        let _ = var_base;
        Self {
            cache_size: view::get_u32(payload, base + 0),
            hits: view::get_u64(payload, base + 8),
            misses: view::get_u64(payload, base + 16),
        }
    }

    /// Compare only the primary-key fields against a proxy.
    #[must_use]
    pub fn primary_key_matches(&self, other: &CacheStatsProxy<'_>) -> bool {
        self.cache_size == other.cache_size()
    }

    /// Full field-by-field comparison against a proxy.
    #[must_use]
    pub fn eq_proxy(&self, other: &CacheStatsProxy<'_>) -> bool {
        self.cache_size == other.cache_size()
            && self.hits == other.hits()
            && self.misses == other.misses()
    }
}

impl ShmType for CacheStats {
    const TYPE_HASH: u64 = 0xa6503de19c7f24b8;
    const FIXED_SIZE: usize = 24;
    const ALIGNMENT: usize = 8;
    const HAS_VARIABLE_DATA: bool = false;

    type Proxy<'a> = CacheStatsProxy<'a>;
    type ProxyMut<'a> = CacheStatsProxyMut<'a>;

    fn descriptor() -> &'static TypeDescriptor {
        &CACHE_STATS_DESC
    }

    fn var_data_size(&self) -> usize {
        0
    }

    fn serialize(&self) -> Vec<u8> {
        let mut buf = vec![0u8; Self::FIXED_SIZE];
        let region = VarRegion::new(&buf);
        self.write_fields(&mut buf, 0, &region);
        buf
    }

    fn verify(payload: &[u8]) -> frame::Result<()> {
        proxy::verify_fixed_len(payload, Self::FIXED_SIZE)?;
        let mut check = VarCheck::new(payload.len() - Self::FIXED_SIZE);
        Self::verify_fields(payload, 0, Self::FIXED_SIZE, &mut check)?;
        check.finish()
    }

    fn proxy(payload: &[u8]) -> CacheStatsProxy<'_> {
        CacheStatsProxy {
            payload,
            base: 0,
            var_base: Self::FIXED_SIZE,
        }
    }

    fn proxy_mut(payload: &mut [u8]) -> CacheStatsProxyMut<'_> {
        CacheStatsProxyMut { payload, base: 0 }
    }

    fn from_payload(payload: &[u8]) -> frame::Result<Self> {
        Self::verify(payload)?;
        Ok(Self::read_fields(payload, 0, Self::FIXED_SIZE))
    }
}

fn verify_cache_stats(payload: &[u8]) -> frame::Result<()> {
    <CacheStats as ShmType>::verify(payload)
}

static MODULE_ENTRIES: [TypeEntry; 4] = [
    TypeEntry {
        type_hash: 0x7c31a9f2645d0e8b,
        type_index: 0,
        descriptor: &POINT_DESC,
        verify: verify_point,
    },
    TypeEntry {
        type_hash: 0xd94f1b6e82a35c07,
        type_index: 1,
        descriptor: &CACHE_CONFIG_DESC,
        verify: verify_cache_config,
    },
    TypeEntry {
        type_hash: 0x21e8c57a9b04fd63,
        type_index: 2,
        descriptor: &SWEEP_DESC,
        verify: verify_sweep,
    },
    TypeEntry {
        type_hash: 0xa6503de19c7f24b8,
        type_index: 3,
        descriptor: &CACHE_STATS_DESC,
        verify: verify_cache_stats,
    },
];

static MODULE: SchemaModule = SchemaModule {
    name: "bench",
    entries: &MODULE_ENTRIES,
};

/// Registry entry table for this schema module.
#[must_use]
pub fn schema_module() -> &'static SchemaModule {
    &MODULE
}
