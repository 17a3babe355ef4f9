pub mod constant;
pub mod cursor;
pub mod direction;
pub mod params;
pub mod work_item;
