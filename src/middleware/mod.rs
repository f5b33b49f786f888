/*
 * Responsibility
 * - middleware public interface
 * - auth gates, access log / request id / limits, CORS
 */
pub mod auth;
pub mod cors;
pub mod http;
