//! Fixed-layout save header codec.
//!
//! Field order below is the wire order; reordering a field changes the
//! format. All multi-byte integers are little-endian. The codec never
//! relies on host struct packing: decode and encode walk the buffer with
//! a running offset, and the [`offset`] table pins the layout in tests.

use crate::constants::{
    DIFFICULTY_TIERS, HEADER_LEN, HOTKEY_SLOTS, MOUSE_BINDINGS, NAME_FIELD_LEN, NPC_REGION_LEN,
    QUEST_BLOCK_LEN, WAYPOINT_BLOCK_LEN,
};

/// Byte offsets of the addressable header fields, derived once from the
/// wire layout. `tests::offsets_match_the_running_codec` checks them
/// against the actual decode/encode walk.
pub mod offset {
    pub const FILE_ID: usize = 0;
    pub const FILE_VERSION: usize = 4;
    pub const FILE_SIZE: usize = 8;
    pub const CHECKSUM: usize = 12;
    pub const ACTIVE_ARMS: usize = 16;
    pub const NAME: usize = 20;
    pub const STATUS: usize = 36;
    pub const PROGRESSION: usize = 37;
    pub const CLASS: usize = 40;
    pub const LEVEL: usize = 43;
    pub const TIMESTAMP: usize = 48;
    pub const HOTKEYS: usize = 56;
    pub const MOUSE: usize = 120;
    pub const DIFFICULTY: usize = 168;
    pub const MAP_ID: usize = 171;
    pub const MERC_DEAD: usize = 177;
    pub const MERC_ID: usize = 179;
    pub const MERC_LANG_INDEX: usize = 183;
    pub const MERC_ATTR: usize = 185;
    pub const MERC_EXP: usize = 187;
    pub const QUESTS: usize = 345;
    pub const WAYPOINTS: usize = 641;
    pub const NPC_INTROS: usize = 716;
    pub const TAIL: usize = 767;
}

/// Decoded save header. Reserved spans and the quest/waypoint/NPC blocks
/// are opaque: they round-trip verbatim and are never interpreted here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub file_id: u32,      // 0
    pub file_version: u32, // 4
    pub file_size: u32,    // 8
    pub checksum: u32,     // 12
    pub active_arms: u32,  // 16

    pub name: [u8; NAME_FIELD_LEN], // 20
    pub status: u8,                 // 36
    pub progression: u8,            // 37
    pub reserved0: [u8; 2],         // 38
    pub class: u8,                  // 40
    pub reserved1: [u8; 2],         // 41
    pub level: u8,                  // 43

    pub reserved2: [u8; 4], // 44
    pub timestamp: u32,     // 48
    pub reserved3: [u8; 4], // 52

    pub hotkeys: [u32; HOTKEY_SLOTS], // 56
    pub mouse: [u32; MOUSE_BINDINGS], // 120

    pub reserved4: [u8; 32], // 136

    pub difficulty: [u8; DIFFICULTY_TIERS], // 168, one byte per game mode
    pub map_id: u32,                        // 171

    pub merc_reserved: u16,  // 175
    pub merc_dead: u16,      // 177
    pub merc_id: u32,        // 179
    pub merc_lang_index: u16, // 183
    pub merc_attr: u16,      // 185
    pub merc_exp: u32,       // 187

    pub reserved5: [u8; 144], // 191

    pub marker_woo: [u8; 4], // 335
    pub reserved6: [u8; 6],  // 339

    pub quests: [[u8; QUEST_BLOCK_LEN]; DIFFICULTY_TIERS], // 345, one block per tier

    pub marker_ws: [u8; 2], // 633
    pub reserved7: [u8; 6], // 635

    pub waypoints: [[u8; WAYPOINT_BLOCK_LEN]; DIFFICULTY_TIERS], // 641, one block per tier

    pub reserved8: [u8; 1],  // 713
    pub marker_w4: [u8; 2],  // 714
    pub npc_intros: [u8; NPC_REGION_LEN], // 716

    pub marker_gf: [u8; 2], // 765
}

impl Header {
    /// Serialized size of the header in bytes.
    pub const LEN: usize = HEADER_LEN;

    /// Decodes the header from its fixed-size wire form.
    pub fn decode(bytes: &[u8; HEADER_LEN]) -> Self {
        let mut offset = 0;

        let file_id = read_u32!(bytes, offset);
        let file_version = read_u32!(bytes, offset);
        let file_size = read_u32!(bytes, offset);
        let checksum = read_u32!(bytes, offset);
        let active_arms = read_u32!(bytes, offset);

        let name = read_bytes!(bytes, offset, NAME_FIELD_LEN);
        let status = read_u8!(bytes, offset);
        let progression = read_u8!(bytes, offset);
        let reserved0 = read_bytes!(bytes, offset, 2);
        let class = read_u8!(bytes, offset);
        let reserved1 = read_bytes!(bytes, offset, 2);
        let level = read_u8!(bytes, offset);

        let reserved2 = read_bytes!(bytes, offset, 4);
        let timestamp = read_u32!(bytes, offset);
        let reserved3 = read_bytes!(bytes, offset, 4);

        let mut hotkeys = [0u32; HOTKEY_SLOTS];
        for slot in hotkeys.iter_mut() {
            *slot = read_u32!(bytes, offset);
        }
        let mut mouse = [0u32; MOUSE_BINDINGS];
        for binding in mouse.iter_mut() {
            *binding = read_u32!(bytes, offset);
        }

        let reserved4 = read_bytes!(bytes, offset, 32);

        let difficulty = read_bytes!(bytes, offset, DIFFICULTY_TIERS);
        let map_id = read_u32!(bytes, offset);

        let merc_reserved = read_u16!(bytes, offset);
        let merc_dead = read_u16!(bytes, offset);
        let merc_id = read_u32!(bytes, offset);
        let merc_lang_index = read_u16!(bytes, offset);
        let merc_attr = read_u16!(bytes, offset);
        let merc_exp = read_u32!(bytes, offset);

        let reserved5 = read_bytes!(bytes, offset, 144);

        let marker_woo = read_bytes!(bytes, offset, 4);
        let reserved6 = read_bytes!(bytes, offset, 6);

        let mut quests = [[0u8; QUEST_BLOCK_LEN]; DIFFICULTY_TIERS];
        for block in quests.iter_mut() {
            *block = read_bytes!(bytes, offset, QUEST_BLOCK_LEN);
        }

        let marker_ws = read_bytes!(bytes, offset, 2);
        let reserved7 = read_bytes!(bytes, offset, 6);

        let mut waypoints = [[0u8; WAYPOINT_BLOCK_LEN]; DIFFICULTY_TIERS];
        for block in waypoints.iter_mut() {
            *block = read_bytes!(bytes, offset, WAYPOINT_BLOCK_LEN);
        }

        let reserved8 = read_bytes!(bytes, offset, 1);
        let marker_w4 = read_bytes!(bytes, offset, 2);
        let npc_intros = read_bytes!(bytes, offset, NPC_REGION_LEN);

        let marker_gf = read_bytes!(bytes, offset, 2);

        debug_assert_eq!(offset, HEADER_LEN);

        Header {
            file_id,
            file_version,
            file_size,
            checksum,
            active_arms,
            name,
            status,
            progression,
            reserved0,
            class,
            reserved1,
            level,
            reserved2,
            timestamp,
            reserved3,
            hotkeys,
            mouse,
            reserved4,
            difficulty,
            map_id,
            merc_reserved,
            merc_dead,
            merc_id,
            merc_lang_index,
            merc_attr,
            merc_exp,
            reserved5,
            marker_woo,
            reserved6,
            quests,
            marker_ws,
            reserved7,
            waypoints,
            reserved8,
            marker_w4,
            npc_intros,
            marker_gf,
        }
    }

    /// Encodes the header into its fixed-size wire form.
    pub fn encode(&self, out: &mut [u8; HEADER_LEN]) {
        let mut offset = 0;

        write_u32!(out, offset, self.file_id);
        write_u32!(out, offset, self.file_version);
        write_u32!(out, offset, self.file_size);
        write_u32!(out, offset, self.checksum);
        write_u32!(out, offset, self.active_arms);

        write_bytes!(out, offset, self.name);
        write_u8!(out, offset, self.status);
        write_u8!(out, offset, self.progression);
        write_bytes!(out, offset, self.reserved0);
        write_u8!(out, offset, self.class);
        write_bytes!(out, offset, self.reserved1);
        write_u8!(out, offset, self.level);

        write_bytes!(out, offset, self.reserved2);
        write_u32!(out, offset, self.timestamp);
        write_bytes!(out, offset, self.reserved3);

        for slot in self.hotkeys {
            write_u32!(out, offset, slot);
        }
        for binding in self.mouse {
            write_u32!(out, offset, binding);
        }

        write_bytes!(out, offset, self.reserved4);

        write_bytes!(out, offset, self.difficulty);
        write_u32!(out, offset, self.map_id);

        write_u16!(out, offset, self.merc_reserved);
        write_u16!(out, offset, self.merc_dead);
        write_u32!(out, offset, self.merc_id);
        write_u16!(out, offset, self.merc_lang_index);
        write_u16!(out, offset, self.merc_attr);
        write_u32!(out, offset, self.merc_exp);

        write_bytes!(out, offset, self.reserved5);

        write_bytes!(out, offset, self.marker_woo);
        write_bytes!(out, offset, self.reserved6);

        for block in self.quests {
            write_bytes!(out, offset, block);
        }

        write_bytes!(out, offset, self.marker_ws);
        write_bytes!(out, offset, self.reserved7);

        for block in self.waypoints {
            write_bytes!(out, offset, block);
        }

        write_bytes!(out, offset, self.reserved8);
        write_bytes!(out, offset, self.marker_w4);
        write_bytes!(out, offset, self.npc_intros);

        write_bytes!(out, offset, self.marker_gf);

        debug_assert_eq!(offset, HEADER_LEN);
    }
}

#[cfg(test)]
mod tests {
    use super::{Header, offset};
    use crate::constants::HEADER_LEN;

    fn patterned_buffer() -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = (i % 251) as u8;
        }
        bytes
    }

    #[test]
    fn round_trip_preserves_every_byte() {
        let bytes = patterned_buffer();
        let header = Header::decode(&bytes);

        let mut encoded = [0u8; HEADER_LEN];
        header.encode(&mut encoded);

        assert_eq!(encoded, bytes);
    }

    #[test]
    fn decode_then_decode_of_encode_is_identity() {
        let header = Header::decode(&patterned_buffer());

        let mut encoded = [0u8; HEADER_LEN];
        header.encode(&mut encoded);

        assert_eq!(Header::decode(&encoded), header);
    }

    #[test]
    fn offsets_match_the_running_codec() {
        let bytes = patterned_buffer();
        let header = Header::decode(&bytes);

        let u32_at = |at: usize| u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
        let u16_at = |at: usize| u16::from_le_bytes([bytes[at], bytes[at + 1]]);

        assert_eq!(header.file_id, u32_at(offset::FILE_ID));
        assert_eq!(header.file_version, u32_at(offset::FILE_VERSION));
        assert_eq!(header.file_size, u32_at(offset::FILE_SIZE));
        assert_eq!(header.checksum, u32_at(offset::CHECKSUM));
        assert_eq!(header.active_arms, u32_at(offset::ACTIVE_ARMS));
        assert_eq!(header.name[..], bytes[offset::NAME..offset::NAME + 16]);
        assert_eq!(header.status, bytes[offset::STATUS]);
        assert_eq!(header.progression, bytes[offset::PROGRESSION]);
        assert_eq!(header.class, bytes[offset::CLASS]);
        assert_eq!(header.level, bytes[offset::LEVEL]);
        assert_eq!(header.timestamp, u32_at(offset::TIMESTAMP));
        assert_eq!(header.hotkeys[0], u32_at(offset::HOTKEYS));
        assert_eq!(header.mouse[0], u32_at(offset::MOUSE));
        assert_eq!(
            header.difficulty[..],
            bytes[offset::DIFFICULTY..offset::DIFFICULTY + 3]
        );
        assert_eq!(header.map_id, u32_at(offset::MAP_ID));
        assert_eq!(header.merc_dead, u16_at(offset::MERC_DEAD));
        assert_eq!(header.merc_id, u32_at(offset::MERC_ID));
        assert_eq!(header.merc_lang_index, u16_at(offset::MERC_LANG_INDEX));
        assert_eq!(header.merc_attr, u16_at(offset::MERC_ATTR));
        assert_eq!(header.merc_exp, u32_at(offset::MERC_EXP));
        assert_eq!(
            header.quests[0][..],
            bytes[offset::QUESTS..offset::QUESTS + 96]
        );
        assert_eq!(
            header.waypoints[0][..],
            bytes[offset::WAYPOINTS..offset::WAYPOINTS + 24]
        );
        assert_eq!(
            header.npc_intros[..],
            bytes[offset::NPC_INTROS..offset::NPC_INTROS + 49]
        );
    }

    #[test]
    fn offset_table_covers_exactly_the_header() {
        assert_eq!(offset::TAIL, HEADER_LEN);
        assert_eq!(Header::LEN, HEADER_LEN);
    }

    #[test]
    fn encode_writes_mutated_fields_at_their_offsets() {
        let mut header = Header::decode(&[0u8; HEADER_LEN]);
        header.checksum = 0xDEAD_BEEF;
        header.class = 4;
        header.level = 99;
        header.map_id = 0x0102_0304;

        let mut encoded = [0u8; HEADER_LEN];
        header.encode(&mut encoded);

        assert_eq!(
            encoded[offset::CHECKSUM..offset::CHECKSUM + 4],
            0xDEAD_BEEFu32.to_le_bytes()
        );
        assert_eq!(encoded[offset::CLASS], 4);
        assert_eq!(encoded[offset::LEVEL], 99);
        assert_eq!(
            encoded[offset::MAP_ID..offset::MAP_ID + 4],
            0x0102_0304u32.to_le_bytes()
        );
    }
}
