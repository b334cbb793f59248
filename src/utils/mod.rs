pub mod routing_audit;
