mod token_props;
