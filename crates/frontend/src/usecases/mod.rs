pub mod u101_point_of_sale;
