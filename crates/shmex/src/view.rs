// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! Bounds-checked little-endian field accessors.
//!
//! Generated proxies never index payload bytes directly; all reads and
//! writes go through these helpers so that a verified payload can be
//! viewed without `unsafe` and an unverified one degrades to defaults
//! instead of panicking. Getters return the type's zero value when the
//! payload is too short; the verify pass is where corruption is actually
//! reported.

use crate::frame::VAR_SLOT_SIZE;

macro_rules! le_accessors {
    ($get:ident, $put:ident, $ty:ty) => {
        #[doc = concat!("Read a little-endian `", stringify!($ty), "` at `offset`.")]
        #[must_use]
        pub fn $get(buf: &[u8], offset: usize) -> $ty {
            const N: usize = std::mem::size_of::<$ty>();
            match buf.get(offset..offset + N) {
                Some(bytes) => {
                    let mut raw = [0u8; N];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_le_bytes(raw)
                }
                None => <$ty>::default(),
            }
        }

        #[doc = concat!("Write a little-endian `", stringify!($ty), "` at `offset`.")]
        pub fn $put(buf: &mut [u8], offset: usize, value: $ty) {
            const N: usize = std::mem::size_of::<$ty>();
            if let Some(bytes) = buf.get_mut(offset..offset + N) {
                bytes.copy_from_slice(&value.to_le_bytes());
            }
        }
    };
}

le_accessors!(get_u8, put_u8, u8);
le_accessors!(get_u16, put_u16, u16);
le_accessors!(get_u32, put_u32, u32);
le_accessors!(get_u64, put_u64, u64);
le_accessors!(get_i8, put_i8, i8);
le_accessors!(get_i16, put_i16, i16);
le_accessors!(get_i32, put_i32, i32);
le_accessors!(get_i64, put_i64, i64);
le_accessors!(get_f32, put_f32, f32);
le_accessors!(get_f64, put_f64, f64);

/// Read a bool stored as a single byte (nonzero is true).
#[must_use]
pub fn get_bool(buf: &[u8], offset: usize) -> bool {
    get_u8(buf, offset) != 0
}

/// Write a bool as a single byte.
pub fn put_bool(buf: &mut [u8], offset: usize, value: bool) {
    put_u8(buf, offset, u8::from(value));
}

/// Read a variable-length field's inline `(offset, length)` slot.
#[must_use]
pub fn get_var_slot(buf: &[u8], slot_offset: usize) -> (u64, u64) {
    (get_u64(buf, slot_offset), get_u64(buf, slot_offset + 8))
}

/// Write a variable-length field's inline `(offset, length)` slot.
pub fn put_var_slot(buf: &mut [u8], slot_offset: usize, offset: u64, length: u64) {
    put_u64(buf, slot_offset, offset);
    put_u64(buf, slot_offset + 8, length);
}

/// Read a string field: resolve its slot against the variable region
/// starting at `var_base`. Returns `""` on any bounds or UTF-8 failure;
/// the verify pass reports those.
#[must_use]
pub fn get_str<'a>(buf: &'a [u8], slot_offset: usize, var_base: usize) -> &'a str {
    std::str::from_utf8(get_bytes(buf, slot_offset, var_base)).unwrap_or_default()
}

/// Read a variable-length field's raw bytes. Returns `&[]` on bounds
/// failure.
#[must_use]
pub fn get_bytes<'a>(buf: &'a [u8], slot_offset: usize, var_base: usize) -> &'a [u8] {
    let (offset, length) = get_var_slot(buf, slot_offset);
    let start = match (var_base as u64).checked_add(offset) {
        Some(s) => s,
        None => return &[],
    };
    let end = match start.checked_add(length) {
        Some(e) => e,
        None => return &[],
    };
    if end > buf.len() as u64 {
        return &[];
    }
    &buf[start as usize..end as usize]
}

/// Scalars that can live in a fixed array field.
pub trait Scalar: Copy + Default {
    const SIZE: usize;
    fn read_le(buf: &[u8], offset: usize) -> Self;
    fn write_le(buf: &mut [u8], offset: usize, value: Self);
}

macro_rules! impl_scalar {
    ($ty:ty, $get:ident, $put:ident) => {
        impl Scalar for $ty {
            const SIZE: usize = std::mem::size_of::<$ty>();
            fn read_le(buf: &[u8], offset: usize) -> Self {
                $get(buf, offset)
            }
            fn write_le(buf: &mut [u8], offset: usize, value: Self) {
                $put(buf, offset, value);
            }
        }
    };
}

impl_scalar!(u8, get_u8, put_u8);
impl_scalar!(u16, get_u16, put_u16);
impl_scalar!(u32, get_u32, put_u32);
impl_scalar!(u64, get_u64, put_u64);
impl_scalar!(i8, get_i8, put_i8);
impl_scalar!(i16, get_i16, put_i16);
impl_scalar!(i32, get_i32, put_i32);
impl_scalar!(i64, get_i64, put_i64);
impl_scalar!(f32, get_f32, put_f32);
impl_scalar!(f64, get_f64, put_f64);

impl Scalar for bool {
    const SIZE: usize = 1;
    fn read_le(buf: &[u8], offset: usize) -> Self {
        get_bool(buf, offset)
    }
    fn write_le(buf: &mut [u8], offset: usize, value: Self) {
        put_bool(buf, offset, value);
    }
}

/// Zero-copy view over a fixed array field.
#[derive(Debug, Clone, Copy)]
pub struct ArrayView<'a, T: Scalar> {
    buf: &'a [u8],
    base: usize,
    len: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<'a, T: Scalar> ArrayView<'a, T> {
    #[must_use]
    pub fn new(buf: &'a [u8], base: usize, len: usize) -> Self {
        Self {
            buf,
            base,
            len,
            _marker: std::marker::PhantomData,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Element at `index`, or the default past the end.
    #[must_use]
    pub fn get(&self, index: usize) -> T {
        if index >= self.len {
            return T::default();
        }
        T::read_le(self.buf, self.base + index * T::SIZE)
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + 'a {
        let buf = self.buf;
        let base = self.base;
        (0..self.len).map(move |i| T::read_le(buf, base + i * T::SIZE))
    }

    /// Copy the elements into a `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }
}

/// Write a whole fixed array field from a slice. Extra source elements
/// are ignored; missing ones leave the destination untouched.
pub fn put_array<T: Scalar>(buf: &mut [u8], base: usize, len: usize, values: &[T]) {
    for (i, value) in values.iter().take(len).enumerate() {
        T::write_le(buf, base + i * T::SIZE, *value);
    }
}

// Compile-time check that the slot helpers match the wire layout.
const _: () = assert!(VAR_SLOT_SIZE == 16);
