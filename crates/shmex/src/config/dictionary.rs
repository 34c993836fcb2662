// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! Open-addressing config dictionary in shared memory.
//!
//! ```text
//! +--------------------------------------+
//! | DictHeader       (64 bytes, aligned) |
//! | DictSlot[0]      (64 bytes, aligned) |
//! | ...                                  |
//! | DictSlot[n-1]                        |
//! | blob arena       (arena_bytes)       |
//! +--------------------------------------+
//! ```
//!
//! Entries are keyed by the packed key `type_hash (LE) || primary key
//! bytes`, probed linearly from `fnv1a_32(key) % slot_count`. Slots move
//! EMPTY -> CLAIMED (CAS) -> OCCUPIED (Release) and never back, so a
//! probe can stop at the first EMPTY slot and published entries are
//! immortal; deletion is not supported. Payload bytes live in a
//! bump-allocated arena and are updated in place at fixed size.
//!
//! Concurrent writers to one entry are last-writer-wins; a reader
//! overlapping a writer may observe a mix of old and new payload bytes.
//! Deployments that need tearing-free updates serialize writers through
//! the host channel instead of writing the dictionary directly.

use super::{ConfigError, Result};
use crate::channel::ShmSegment;
use crate::proxy::{extract_primary_key, ShmType};
use crate::schema::{fnv1a_32, TypeDescriptor};
use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

/// Magic "SHMD" marking an initialized dictionary header.
pub const DICT_MAGIC: u32 = 0x5348_4D44;
/// Dictionary layout version.
pub const DICT_VERSION: u32 = 1;

/// Inline capacity of the packed key: 8 bytes of type hash plus up to
/// 24 bytes of primary key.
pub const MAX_KEY_BYTES: usize = 32;

const STATE_EMPTY: u32 = 0;
const STATE_CLAIMED: u32 = 1;
const STATE_OCCUPIED: u32 = 2;

/// Slots stay usable up to 7/8 occupancy; beyond that probe chains
/// degrade and inserts report DictionaryFull.
const LOAD_NUM: u32 = 7;
const LOAD_DEN: u32 = 8;

/// Spins tolerated on a slot stuck in the claiming state. A claimant
/// that dies between claim and publish never finishes the transition,
/// so the wait has to be bounded.
const CLAIMED_SPIN_LIMIT: u32 = 1 << 16;

#[repr(C, align(64))]
struct DictHeader {
    magic: AtomicU32,
    version: AtomicU32,
    slot_count: AtomicU32,
    occupied: AtomicU32,
    arena_capacity: AtomicU64,
    arena_used: AtomicU64,
    _pad: [u8; 32],
}

#[repr(C, align(64))]
struct DictSlot {
    state: AtomicU32,
    key_len: AtomicU32,
    key_hash: AtomicU32,
    payload_len: AtomicU32,
    type_hash: AtomicU64,
    blob_offset: AtomicU64,
    /// Packed key bytes; written before the OCCUPIED publish, read
    /// after an Acquire load of state.
    key: UnsafeCell<[u8; MAX_KEY_BYTES]>,
}

const _: () = assert!(std::mem::size_of::<DictHeader>() == 64);
const _: () = assert!(std::mem::size_of::<DictSlot>() == 64);

const HEADER_SIZE: usize = 64;
const SLOT_SIZE: usize = 64;

/// Shared config dictionary handle.
#[derive(Debug)]
pub struct ConfigDictionary {
    segment: ShmSegment,
    slot_count: usize,
    arena_capacity: usize,
}

// SAFETY: All cross-process state is atomics; the key and arena bytes
// are synchronized through the slot state publish protocol.
unsafe impl Send for ConfigDictionary {}
unsafe impl Sync for ConfigDictionary {}

impl ConfigDictionary {
    /// Create the dictionary segment.
    pub fn create(name: &str, slot_count: usize, arena_bytes: usize) -> Result<Self> {
        if slot_count == 0 || slot_count > u32::MAX as usize {
            return Err(ConfigError::Corruption(format!(
                "Unusable slot count {slot_count}"
            )));
        }
        let size = HEADER_SIZE + slot_count * SLOT_SIZE + arena_bytes;
        let segment = ShmSegment::create(name, size)?;
        let dict = Self {
            segment,
            slot_count,
            arena_capacity: arena_bytes,
        };
        let header = dict.header();
        header
            .slot_count
            .store(slot_count as u32, Ordering::Relaxed);
        header
            .arena_capacity
            .store(arena_bytes as u64, Ordering::Relaxed);
        header.version.store(DICT_VERSION, Ordering::Relaxed);
        // Publish the magic last; openers that see it see the sizes.
        header.magic.store(DICT_MAGIC, Ordering::Release);
        Ok(dict)
    }

    /// Open an existing dictionary segment.
    pub fn open(name: &str) -> Result<Self> {
        let (slot_count, arena_capacity) = {
            let header_map = ShmSegment::open(name, HEADER_SIZE)?;
            // SAFETY: The mapping is at least HEADER_SIZE bytes and
            // page-aligned, satisfying the header's layout.
            let header = unsafe { &*(header_map.as_ptr() as *const DictHeader) };
            if header.magic.load(Ordering::Acquire) != DICT_MAGIC {
                return Err(ConfigError::Corruption(format!(
                    "Bad magic in segment {name}"
                )));
            }
            let version = header.version.load(Ordering::Relaxed);
            if version != DICT_VERSION {
                return Err(ConfigError::Corruption(format!(
                    "Dictionary version {version}, expected {DICT_VERSION}"
                )));
            }
            (
                header.slot_count.load(Ordering::Relaxed) as usize,
                header.arena_capacity.load(Ordering::Relaxed) as usize,
            )
        };
        if slot_count == 0 {
            return Err(ConfigError::Corruption(format!(
                "Zero slot count in segment {name}"
            )));
        }
        let size = HEADER_SIZE + slot_count * SLOT_SIZE + arena_capacity;
        let segment = ShmSegment::open(name, size)?;
        Ok(Self {
            segment,
            slot_count,
            arena_capacity,
        })
    }

    /// Unlink the dictionary's segment name.
    pub fn unlink(&self) -> Result<()> {
        ShmSegment::unlink(self.segment.name())?;
        Ok(())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.segment.name()
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Published entry count.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.header().occupied.load(Ordering::Acquire) as usize
    }

    /// Arena bytes allocated so far.
    #[must_use]
    pub fn arena_used(&self) -> usize {
        self.header().arena_used.load(Ordering::Acquire) as usize
    }

    #[must_use]
    pub fn arena_capacity(&self) -> usize {
        self.arena_capacity
    }

    #[inline]
    fn header(&self) -> &DictHeader {
        // SAFETY: The header lives at offset 0 of a mapping that is at
        // least HEADER_SIZE bytes; mmap's page alignment satisfies
        // align(64).
        unsafe { &*(self.segment.as_ptr() as *const DictHeader) }
    }

    #[inline]
    fn slot(&self, index: usize) -> &DictSlot {
        debug_assert!(index < self.slot_count);
        // SAFETY: index is bounds-checked against slot_count and the
        // segment was sized for the full slot table.
        unsafe {
            &*(self
                .segment
                .as_ptr()
                .add(HEADER_SIZE + index * SLOT_SIZE) as *const DictSlot)
        }
    }

    #[inline]
    fn arena_ptr(&self) -> *mut u8 {
        // SAFETY: The arena starts right after the slot table, inside
        // the mapping.
        unsafe {
            self.segment
                .as_ptr()
                .add(HEADER_SIZE + self.slot_count * SLOT_SIZE)
        }
    }

    /// Pack the dictionary key: type hash little-endian, then primary
    /// key bytes.
    fn pack_key(type_hash: u64, pk: &[u8]) -> Result<([u8; MAX_KEY_BYTES], usize)> {
        let len = 8 + pk.len();
        if len > MAX_KEY_BYTES {
            return Err(ConfigError::KeyTooLong { len });
        }
        let mut key = [0u8; MAX_KEY_BYTES];
        key[0..8].copy_from_slice(&type_hash.to_le_bytes());
        key[8..len].copy_from_slice(pk);
        Ok((key, len))
    }

    fn slot_matches(&self, slot: &DictSlot, key_hash: u32, key: &[u8]) -> bool {
        if slot.key_hash.load(Ordering::Relaxed) != key_hash {
            return false;
        }
        if slot.key_len.load(Ordering::Relaxed) as usize != key.len() {
            return false;
        }
        // SAFETY: The slot is OCCUPIED (caller checked with Acquire),
        // so the writer's key bytes happened-before this read and the
        // key is immutable once published.
        let stored = unsafe { &*slot.key.get() };
        &stored[..key.len()] == key
    }

    /// Bump-allocate `len` bytes (8-byte aligned) from the arena.
    fn alloc_blob(&self, len: usize) -> Result<u64> {
        let need = (len + 7) & !7;
        let header = self.header();
        let mut used = header.arena_used.load(Ordering::Relaxed);
        loop {
            if used as usize + need > self.arena_capacity {
                return Err(ConfigError::ArenaExhausted {
                    need,
                    free: self.arena_capacity - used as usize,
                });
            }
            match header.arena_used.compare_exchange_weak(
                used,
                used + need as u64,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Ok(used),
                Err(current) => used = current,
            }
        }
    }

    /// Copy `payload` into an entry's blob.
    fn write_blob(&self, offset: u64, payload: &[u8]) {
        // SAFETY: offset came from alloc_blob, which bounds the span
        // inside the arena. Concurrent writers to one entry race by
        // design (last-writer-wins, see module docs).
        unsafe {
            std::ptr::copy_nonoverlapping(
                payload.as_ptr(),
                self.arena_ptr().add(offset as usize),
                payload.len(),
            );
        }
    }

    /// Insert or update the entry for `payload` under its type's
    /// primary key. Returns the slot index. Idempotent: re-publishing
    /// the same key updates the existing entry in place.
    pub fn create_or_update_raw(&self, desc: &TypeDescriptor, payload: &[u8]) -> Result<u32> {
        if desc.has_variable_data {
            return Err(ConfigError::VariableSize(desc.type_name));
        }
        if desc.primary_key_len() == 0 {
            return Err(ConfigError::MissingPrimaryKey(desc.type_name));
        }
        let pk = extract_primary_key(desc, payload).ok_or(ConfigError::Frame(
            crate::frame::FrameError::TooShort {
                need: desc.fixed_size as usize,
                have: payload.len(),
            },
        ))?;
        let (key, key_len) = Self::pack_key(desc.type_hash, &pk)?;
        let key = &key[..key_len];
        let key_hash = fnv1a_32(key);
        let start = key_hash as usize % self.slot_count;
        let mut claimed_spins = 0u32;

        for probe in 0..self.slot_count {
            let index = (start + probe) % self.slot_count;
            let slot = self.slot(index);
            loop {
                match slot.state.load(Ordering::Acquire) {
                    STATE_OCCUPIED => {
                        if !self.slot_matches(slot, key_hash, key) {
                            break; // next probe
                        }
                        let stored = slot.payload_len.load(Ordering::Relaxed) as usize;
                        if stored != payload.len() {
                            return Err(ConfigError::SizeMismatch {
                                stored,
                                given: payload.len(),
                            });
                        }
                        self.write_blob(slot.blob_offset.load(Ordering::Relaxed), payload);
                        return Ok(index as u32);
                    }
                    STATE_EMPTY => {
                        let header = self.header();
                        let occupied = header.occupied.load(Ordering::Acquire);
                        if occupied * LOAD_DEN >= self.slot_count as u32 * LOAD_NUM {
                            return Err(ConfigError::DictionaryFull);
                        }
                        if slot
                            .state
                            .compare_exchange(
                                STATE_EMPTY,
                                STATE_CLAIMED,
                                Ordering::AcqRel,
                                Ordering::Acquire,
                            )
                            .is_err()
                        {
                            continue; // lost the claim, re-read state
                        }
                        let blob_offset = match self.alloc_blob(payload.len()) {
                            Ok(offset) => offset,
                            Err(e) => {
                                // Release the claim so the slot stays usable.
                                slot.state.store(STATE_EMPTY, Ordering::Release);
                                return Err(e);
                            }
                        };
                        self.write_blob(blob_offset, payload);
                        // SAFETY: The slot is CLAIMED by this thread;
                        // no reader touches the key until the OCCUPIED
                        // publish below.
                        unsafe {
                            (&mut (*slot.key.get()))[..key_len].copy_from_slice(key);
                        }
                        slot.key_len.store(key_len as u32, Ordering::Relaxed);
                        slot.key_hash.store(key_hash, Ordering::Relaxed);
                        slot.payload_len
                            .store(payload.len() as u32, Ordering::Relaxed);
                        slot.type_hash.store(desc.type_hash, Ordering::Relaxed);
                        slot.blob_offset.store(blob_offset, Ordering::Relaxed);
                        header.occupied.fetch_add(1, Ordering::AcqRel);
                        slot.state.store(STATE_OCCUPIED, Ordering::Release);
                        log::debug!(
                            "[CONFIG] Published {} entry in slot {index}",
                            desc.type_name
                        );
                        return Ok(index as u32);
                    }
                    STATE_CLAIMED => {
                        // Another process is mid-insert; wait for its
                        // publish to learn whether the keys match. The
                        // wait is bounded: a claimant that crashed
                        // before publishing would otherwise wedge every
                        // later writer of this key.
                        claimed_spins += 1;
                        if claimed_spins > CLAIMED_SPIN_LIMIT {
                            return Err(ConfigError::Corruption(format!(
                                "Slot {index} stuck mid-insert"
                            )));
                        }
                        if claimed_spins % 256 == 0 {
                            std::thread::yield_now();
                        } else {
                            std::hint::spin_loop();
                        }
                        continue;
                    }
                    other => {
                        return Err(ConfigError::Corruption(format!(
                            "Slot {index} in impossible state {other}"
                        )));
                    }
                }
            }
        }
        Err(ConfigError::DictionaryFull)
    }

    /// Typed insert-or-update.
    pub fn create_or_update<T: ShmType>(&self, value: &T) -> Result<u32> {
        let payload = value.serialize();
        self.create_or_update_raw(T::descriptor(), &payload)
    }

    /// Find the slot holding the entry for `(type_hash, pk)`.
    pub fn find(&self, type_hash: u64, pk: &[u8]) -> Result<u32> {
        let (key, key_len) = Self::pack_key(type_hash, pk)?;
        let key = &key[..key_len];
        let key_hash = fnv1a_32(key);
        let start = key_hash as usize % self.slot_count;

        for probe in 0..self.slot_count {
            let index = (start + probe) % self.slot_count;
            let slot = self.slot(index);
            match slot.state.load(Ordering::Acquire) {
                // Slots never return to EMPTY, so the chain ends here.
                STATE_EMPTY => return Err(ConfigError::NotFound),
                STATE_OCCUPIED if self.slot_matches(slot, key_hash, key) => {
                    return Ok(index as u32);
                }
                _ => {}
            }
        }
        Err(ConfigError::NotFound)
    }

    /// Find a typed value's slot by primary key bytes.
    pub fn find_typed<T: ShmType>(&self, pk: &[u8]) -> Result<u32> {
        let slot = self.find(T::TYPE_HASH, pk)?;
        let stored = self.slot(slot as usize).type_hash.load(Ordering::Relaxed);
        if stored != T::TYPE_HASH {
            return Err(ConfigError::TypeMismatch {
                stored,
                given: T::TYPE_HASH,
            });
        }
        Ok(slot)
    }

    /// Run `f` over an entry's live payload bytes.
    ///
    /// The slice aliases shared memory: a concurrent in-place update
    /// may be observed mid-write (see module docs).
    pub fn with_payload<R>(&self, slot_index: u32, f: impl FnOnce(&[u8]) -> R) -> Result<R> {
        let slot = self.checked_slot(slot_index)?;
        let offset = slot.blob_offset.load(Ordering::Relaxed) as usize;
        let len = slot.payload_len.load(Ordering::Relaxed) as usize;
        // SAFETY: offset and len were bounds-checked by alloc_blob at
        // insert time and are immutable once published.
        let bytes = unsafe { std::slice::from_raw_parts(self.arena_ptr().add(offset), len) };
        Ok(f(bytes))
    }

    /// Run `f` over an entry's payload bytes mutably, for in-place
    /// fixed-region edits.
    pub fn with_payload_mut<R>(
        &self,
        slot_index: u32,
        f: impl FnOnce(&mut [u8]) -> R,
    ) -> Result<R> {
        let slot = self.checked_slot(slot_index)?;
        let offset = slot.blob_offset.load(Ordering::Relaxed) as usize;
        let len = slot.payload_len.load(Ordering::Relaxed) as usize;
        // SAFETY: Span bounds as above. Mutation races with concurrent
        // readers and writers of the same entry by design
        // (last-writer-wins).
        let bytes = unsafe { std::slice::from_raw_parts_mut(self.arena_ptr().add(offset), len) };
        Ok(f(bytes))
    }

    /// Copy an entry's payload out.
    pub fn payload(&self, slot_index: u32) -> Result<Vec<u8>> {
        self.with_payload(slot_index, <[u8]>::to_vec)
    }

    /// Overwrite an entry's payload in place. Length must match.
    pub fn update_in_place(&self, slot_index: u32, payload: &[u8]) -> Result<()> {
        let slot = self.checked_slot(slot_index)?;
        let stored = slot.payload_len.load(Ordering::Relaxed) as usize;
        if stored != payload.len() {
            return Err(ConfigError::SizeMismatch {
                stored,
                given: payload.len(),
            });
        }
        self.write_blob(slot.blob_offset.load(Ordering::Relaxed), payload);
        Ok(())
    }

    /// Stored type hash of an entry.
    pub fn entry_type_hash(&self, slot_index: u32) -> Result<u64> {
        Ok(self.checked_slot(slot_index)?.type_hash.load(Ordering::Relaxed))
    }

    fn checked_slot(&self, slot_index: u32) -> Result<&DictSlot> {
        let index = slot_index as usize;
        if index >= self.slot_count {
            return Err(ConfigError::NotFound);
        }
        let slot = self.slot(index);
        if slot.state.load(Ordering::Acquire) != STATE_OCCUPIED {
            return Err(ConfigError::NotFound);
        }
        Ok(slot)
    }
}
