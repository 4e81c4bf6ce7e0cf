// Types layer - database entities and request/response models
pub mod db;
pub mod dto;
