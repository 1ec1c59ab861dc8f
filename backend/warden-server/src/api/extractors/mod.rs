pub mod operator_id;
